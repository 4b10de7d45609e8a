//! Storage operations
//!
//! File level commands: print, create, rename, copy, move and delete. Every
//! operation validates all of its paths before touching the file system.

use log::{error, info};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::{PathKind, ShellResult};
use crate::session::Session;
use crate::shell::Writer;
use crate::storage::filesystem::{create_destination, discard_partial, open_source};
use crate::storage::validation::{ValidationRequest, validate_file};

/// Validates a source/destination pair: the source must be an existing file,
/// the destination must not exist yet. Both must stay inside the root.
pub async fn validate_transfer_pair(
    session: &Session,
    source: &str,
    destination: &str,
) -> ShellResult<(PathBuf, PathBuf)> {
    let source_path = validate_file(session, &ValidationRequest::existing(source, PathKind::File)).await?;
    let destination_path = validate_file(session, &ValidationRequest::absent(destination)).await?;
    Ok((source_path, destination_path))
}

/// Streams a file to the writer verbatim, followed by a newline.
pub async fn print_file(
    session: &Session,
    writer: &mut Writer,
    filename: &str,
    buffer_size: usize,
) -> ShellResult<()> {
    let path = validate_file(session, &ValidationRequest::existing(filename, PathKind::File)).await?;
    let mut reader = open_source(&path, buffer_size).await?;
    let mut buffer = vec![0u8; buffer_size];

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        writer.raw(&buffer[..n])?;
    }
    writer.raw(b"\n")?;

    info!("Printed file {}", path.display());
    Ok(())
}

/// Creates an empty file.
pub async fn create_file(session: &Session, filename: &str) -> ShellResult<PathBuf> {
    let path = validate_file(session, &ValidationRequest::absent(filename)).await?;
    let mut file = create_destination(&path).await?;
    file.flush().await?;

    info!("Created file {}", path.display());
    Ok(path)
}

/// Renames a file, possibly into another directory.
pub async fn rename_file(session: &Session, source: &str, destination: &str) -> ShellResult<()> {
    let (from, to) = validate_transfer_pair(session, source, destination).await?;
    tokio::fs::rename(&from, &to).await?;

    info!("Renamed {} to {}", from.display(), to.display());
    Ok(())
}

/// Copies a file byte for byte, leaving the source untouched.
pub async fn copy_file(
    session: &Session,
    source: &str,
    destination: &str,
    buffer_size: usize,
) -> ShellResult<()> {
    let (from, to) = validate_transfer_pair(session, source, destination).await?;
    stream_copy(&from, &to, buffer_size).await?;

    info!("Copied {} to {}", from.display(), to.display());
    Ok(())
}

/// Copies a file then deletes the source.
pub async fn move_file(
    session: &Session,
    source: &str,
    destination: &str,
    buffer_size: usize,
) -> ShellResult<()> {
    let (from, to) = validate_transfer_pair(session, source, destination).await?;
    stream_copy(&from, &to, buffer_size).await?;
    tokio::fs::remove_file(&from).await?;

    info!("Moved {} to {}", from.display(), to.display());
    Ok(())
}

/// Deletes a file.
pub async fn delete_file(session: &Session, filename: &str) -> ShellResult<()> {
    let path = validate_file(session, &ValidationRequest::existing(filename, PathKind::File)).await?;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        error!("Failed to delete file {}: {}", path.display(), e);
        return Err(e.into());
    }

    info!("Deleted file {}", path.display());
    Ok(())
}

async fn stream_copy(from: &Path, to: &Path, buffer_size: usize) -> ShellResult<()> {
    let mut reader = open_source(from, buffer_size).await?;
    let mut destination = create_destination(to).await?;

    let copied = async {
        tokio::io::copy_buf(&mut reader, &mut destination).await?;
        destination.flush().await
    }
    .await;

    if let Err(e) = copied {
        error!("Copy {} -> {} failed: {}", from.display(), to.display(), e);
        drop(destination);
        discard_partial(to).await;
        return Err(e.into());
    }
    Ok(())
}
