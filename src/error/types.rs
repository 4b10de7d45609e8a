//! Error types
//!
//! Defines the error kinds a command can fail with. Every kind is caught once,
//! at the dispatch boundary, and rendered as a single line.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result alias used throughout the command handlers
pub type ShellResult<T> = Result<T, ShellError>;

/// What a path was expected to be when an existence check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => write!(f, "file"),
            PathKind::Directory => write!(f, "directory"),
        }
    }
}

/// Command failure kinds
#[derive(Error, Debug)]
pub enum ShellError {
    /// Unknown command, wrong argument count or malformed line.
    /// Carries no detail so nothing about the input is echoed back.
    #[error("Invalid input")]
    InvalidInput,

    /// Empty or missing path argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No such {kind}: {path}")]
    NotFound { path: String, kind: PathKind },

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Resolved path escapes the root directory
    #[error("Access denied, path is outside of the root directory: {0}")]
    OutsideRoot(String),

    /// Underlying I/O or codec failure, message passed through
    #[error("{0}")]
    OperationFailed(String),
}

impl From<io::Error> for ShellError {
    fn from(error: io::Error) -> Self {
        ShellError::OperationFailed(error.to_string())
    }
}

impl ShellError {
    pub fn not_found(path: &str, kind: PathKind) -> Self {
        ShellError::NotFound {
            path: path.to_string(),
            kind,
        }
    }
}
