//! Path validation
//!
//! Resolves user supplied paths against the session's current directory and
//! confines them to the root directory subtree.

use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::error::{PathKind, ShellError, ShellResult};
use crate::session::Session;

/// Precondition a handler places on one of its path arguments.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRequest<'a> {
    pub path: &'a str,
    pub kind: PathKind,
    pub check_existence: bool,
    pub check_non_existence: bool,
}

impl<'a> ValidationRequest<'a> {
    /// `path` must exist and be of the given kind.
    pub fn existing(path: &'a str, kind: PathKind) -> Self {
        Self {
            path,
            kind,
            check_existence: true,
            check_non_existence: false,
        }
    }

    /// `path` must not exist yet.
    pub fn absent(path: &'a str) -> Self {
        Self {
            path,
            kind: PathKind::File,
            check_existence: false,
            check_non_existence: true,
        }
    }
}

/// Joins `input` onto `base` and normalizes `.` and `..` lexically.
///
/// An absolute `input` replaces `base`. `..` never climbs above the
/// filesystem root.
pub fn resolve_path(base: &Path, input: &str) -> PathBuf {
    let joined = base.join(input);
    let mut resolved = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => resolved.push(part),
        }
    }

    resolved
}

/// Lowercased string form without trailing separators.
fn case_folded(path: &Path) -> String {
    path.to_string_lossy()
        .to_lowercase()
        .trim_end_matches(['/', '\\'])
        .to_string()
}

/// Case-insensitive check that `candidate` is `root` or lies below it.
pub fn is_within_root(root: &Path, candidate: &Path) -> bool {
    let root = case_folded(root);
    let candidate = case_folded(candidate);

    match candidate.strip_prefix(root.as_str()) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '\\']),
        None => false,
    }
}

/// Case-insensitive check that `candidate` names the root itself.
pub fn is_root(root: &Path, candidate: &Path) -> bool {
    case_folded(root) == case_folded(candidate)
}

/// Resolves `request.path` and checks it against the session's root and the
/// requested existence preconditions. Returns the absolute path.
pub async fn validate_path(session: &Session, request: &ValidationRequest<'_>) -> ShellResult<PathBuf> {
    if request.path.is_empty() {
        return Err(ShellError::InvalidArgument("path must not be empty".into()));
    }

    let resolved = resolve_path(session.current_dir(), request.path);
    check_resolved(session, &resolved, request).await?;
    Ok(resolved)
}

/// Validates a directory argument: it must exist inside the root.
pub async fn validate_directory(session: &Session, path: &str) -> ShellResult<PathBuf> {
    validate_path(session, &ValidationRequest::existing(path, PathKind::Directory)).await
}

/// Validates a file argument: its parent must be an existing directory
/// inside the root, and the file itself must satisfy `request`.
pub async fn validate_file(session: &Session, request: &ValidationRequest<'_>) -> ShellResult<PathBuf> {
    if request.path.is_empty() {
        return Err(ShellError::InvalidArgument("path must not be empty".into()));
    }

    let resolved = resolve_path(session.current_dir(), request.path);
    let parent = resolved
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ShellError::InvalidArgument(format!("not a file path: {}", request.path)))?;

    let parent_request = ValidationRequest::existing(request.path, PathKind::Directory);
    check_resolved(session, &parent, &parent_request).await?;
    check_resolved(session, &resolved, request).await?;
    Ok(resolved)
}

async fn check_resolved(
    session: &Session,
    resolved: &Path,
    request: &ValidationRequest<'_>,
) -> ShellResult<()> {
    if !resolved.is_absolute() {
        return Err(ShellError::InvalidArgument(format!(
            "cannot resolve path: {}",
            request.path
        )));
    }

    // Root confinement comes first so nothing outside the root is ever probed.
    if !is_within_root(session.root_dir(), resolved) {
        debug!("Rejected {} (resolved {})", request.path, resolved.display());
        return Err(ShellError::OutsideRoot(request.path.to_string()));
    }

    let metadata = tokio::fs::metadata(resolved).await.ok();

    if request.check_existence {
        let matches_kind = match (&metadata, request.kind) {
            (Some(meta), PathKind::File) => meta.is_file(),
            (Some(meta), PathKind::Directory) => meta.is_dir(),
            (None, _) => false,
        };
        if !matches_kind {
            return Err(ShellError::not_found(request.path, request.kind));
        }
    }

    if metadata.is_some() {
        // Symlinks may point outside the root even if the lexical path does not.
        let canonical = tokio::fs::canonicalize(resolved).await?;
        let canonical_root = tokio::fs::canonicalize(session.root_dir()).await?;
        if !is_within_root(&canonical_root, &canonical) {
            debug!("Rejected {} (links to {})", request.path, canonical.display());
            return Err(ShellError::OutsideRoot(request.path.to_string()));
        }
    }

    if request.check_non_existence && metadata.is_some() {
        return Err(ShellError::AlreadyExists(request.path.to_string()));
    }

    Ok(())
}
