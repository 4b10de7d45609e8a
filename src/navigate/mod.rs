//! Navigate module
//!
//! Handles directory navigation: moving up, changing directory and listing
//! the current directory.

mod operations;
mod results;

// Re-export public types and functions
pub use operations::{change_directory, go_up, list_directory};
pub use results::{EntryKind, ListEntry};
