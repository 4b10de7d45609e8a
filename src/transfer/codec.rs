//! Module `codec`
//!
//! Streams a file through the Brotli codec into a new destination file.
//! The destination is removed again if the stream fails halfway.

use async_compression::tokio::bufread::BrotliDecoder;
use async_compression::tokio::write::BrotliEncoder;
use log::{error, info};
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufReader};

use crate::error::ShellResult;
use crate::session::Session;
use crate::storage::filesystem::{create_destination, discard_partial, open_source};
use crate::storage::validate_transfer_pair;
use crate::transfer::modes::CodecMode;

/// Validates `source`/`destination` and streams one through the codec into
/// the other.
pub async fn transcode_file(
    session: &Session,
    mode: CodecMode,
    source: &str,
    destination: &str,
    buffer_size: usize,
) -> ShellResult<()> {
    let (from, to) = validate_transfer_pair(session, source, destination).await?;

    let reader = open_source(&from, buffer_size).await?;
    let writer = create_destination(&to).await?;

    let streamed = match mode {
        CodecMode::Compress => compress_stream(reader, writer).await,
        CodecMode::Decompress => decompress_stream(reader, writer).await,
    };

    match streamed {
        Ok(bytes) => {
            info!(
                "{} {} -> {} ({} bytes written)",
                mode,
                from.display(),
                to.display(),
                bytes
            );
            Ok(())
        }
        Err(e) => {
            error!("Failed to {} {}: {}", mode, from.display(), e);
            discard_partial(&to).await;
            Err(e.into())
        }
    }
}

async fn compress_stream(mut reader: BufReader<File>, writer: File) -> io::Result<u64> {
    let mut encoder = BrotliEncoder::new(writer);
    tokio::io::copy_buf(&mut reader, &mut encoder).await?;
    encoder.shutdown().await?;

    let file = encoder.into_inner();
    Ok(file.metadata().await?.len())
}

async fn decompress_stream(reader: BufReader<File>, mut writer: File) -> io::Result<u64> {
    let mut decoder = BrotliDecoder::new(reader);
    let written = tokio::io::copy(&mut decoder, &mut writer).await?;
    writer.flush().await?;
    Ok(written)
}

/// Compresses `source` into `destination`.
pub async fn compress_file(
    session: &Session,
    source: &str,
    destination: &str,
    buffer_size: usize,
) -> ShellResult<()> {
    transcode_file(session, CodecMode::Compress, source, destination, buffer_size).await
}

/// Decompresses `source` into `destination`.
pub async fn decompress_file(
    session: &Session,
    source: &str,
    destination: &str,
    buffer_size: usize,
) -> ShellResult<()> {
    transcode_file(session, CodecMode::Decompress, source, destination, buffer_size).await
}

