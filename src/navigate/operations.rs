//! Navigation operations implementation

use log::{info, warn};

use crate::error::{ShellError, ShellResult};
use crate::navigate::results::{EntryKind, ListEntry};
use crate::session::Session;
use crate::storage::validation::{is_within_root, validate_directory};

/// Moves one level up, staying put at the root.
pub fn go_up(session: &mut Session) {
    if session.is_at_root() {
        return;
    }

    let Some(parent) = session.current_dir().parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if !is_within_root(session.root_dir(), &parent) {
        warn!("Refusing to leave the root for {}", parent.display());
        return;
    }
    session.set_current_dir(parent);
}

/// Changes the working directory to an existing directory inside the root.
///
/// The canonical form is stored, so the current directory carries no `..`
/// or symlink components.
pub async fn change_directory(session: &mut Session, target_path: &str) -> ShellResult<()> {
    let validated = validate_directory(session, target_path).await?;
    let new_dir = tokio::fs::canonicalize(&validated).await?;

    if !is_within_root(session.root_dir(), &new_dir) {
        return Err(ShellError::OutsideRoot(target_path.to_string()));
    }

    info!("Changed directory to {}", new_dir.display());
    session.set_current_dir(new_dir);
    Ok(())
}

/// Lists the current directory: directories first, then files, each group
/// sorted by name.
pub async fn list_directory(session: &Session) -> ShellResult<Vec<ListEntry>> {
    let mut entries = tokio::fs::read_dir(session.current_dir()).await?;
    let mut listing = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();

        let file_type = entry.file_type().await?;
        let kind = if file_type.is_dir() {
            Some(EntryKind::Directory)
        } else if file_type.is_file() {
            Some(EntryKind::File)
        } else {
            // Symlinks and the like are shown as what they point to.
            match tokio::fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_dir() => Some(EntryKind::Directory),
                Ok(meta) if meta.is_file() => Some(EntryKind::File),
                Ok(_) => None,
                Err(e) => {
                    warn!("Skipping {}: {}", entry.path().display(), e);
                    None
                }
            }
        };

        if let Some(kind) = kind {
            listing.push(ListEntry { name, kind });
        }
    }

    listing.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));

    info!(
        "Listed directory {} - {} entries",
        session.current_dir().display(),
        listing.len()
    );

    Ok(listing)
}
