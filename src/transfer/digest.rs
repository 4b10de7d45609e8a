//! File digests

use log::info;
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;

use crate::error::{PathKind, ShellResult};
use crate::session::Session;
use crate::storage::filesystem::open_source;
use crate::storage::validation::{ValidationRequest, validate_file};

/// Computes the SHA-256 digest of a file as lowercase hex.
pub async fn hash_file(session: &Session, filename: &str, buffer_size: usize) -> ShellResult<String> {
    let path = validate_file(session, &ValidationRequest::existing(filename, PathKind::File)).await?;
    let mut reader = open_source(&path, buffer_size).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; buffer_size];

    loop {
        let n = reader.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let digest = hex::encode(hasher.finalize());
    info!("Hashed {}", path.display());
    Ok(digest)
}
