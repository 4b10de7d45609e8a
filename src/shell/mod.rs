//! Interactive shell
//!
//! Session startup and shutdown, the stdin reader and terminal output.

pub mod core;
pub mod output;

pub use self::core::Shell;
pub use output::{Style, Writer, format_table};
