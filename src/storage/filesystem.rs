//! File system helpers
//!
//! Opening sources and creating destinations for the streaming operations.

use log::warn;
use std::io::Result;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::BufReader;

/// Opens an existing file for buffered reading.
pub async fn open_source(path: &Path, buffer_size: usize) -> Result<BufReader<File>> {
    let file = File::open(path).await?;
    Ok(BufReader::with_capacity(buffer_size, file))
}

/// Creates a new file, failing if something already sits at `path`.
pub async fn create_destination(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
}

/// Removes a partially written destination after a failed stream.
pub async fn discard_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove partial file {}: {}", path.display(), e);
    }
}
