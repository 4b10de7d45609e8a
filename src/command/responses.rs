//! User-facing messages
//!
//! Fixed texts printed by the shell and helpers to format the variable ones.

use std::path::Path;

pub const INVALID_INPUT: &str = "Invalid input";
pub const OPERATION_FAILED: &str = "Operation failed";
pub const PROMPT: &str = "> ";

/// Greeting printed once the session is up
pub fn format_welcome(user_name: &str) -> String {
    format!("Welcome to the File Manager, {user_name}!")
}

/// Farewell printed on `.exit`, Ctrl-C or end of input
pub fn format_farewell(user_name: &str) -> String {
    format!("Thank you for using File Manager, {user_name}, goodbye!")
}

/// Status line printed after every command
pub fn format_location(current_dir: &Path) -> String {
    format!("You are currently in {}", current_dir.display())
}
