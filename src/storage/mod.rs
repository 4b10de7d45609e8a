//! File system storage
//!
//! Path validation and the file level operations built on top of it.

pub mod filesystem;
pub mod operations;
pub mod validation;

pub use operations::{
    copy_file, create_file, delete_file, move_file, print_file, rename_file,
    validate_transfer_pair,
};
pub use validation::{
    ValidationRequest, is_root, is_within_root, resolve_path, validate_directory, validate_file,
};
