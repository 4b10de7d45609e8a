//! Command interpreter
//!
//! Tokenizing input lines, the command table and the per-command handlers.

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod responses;

pub use commands::{COMMANDS, Command, CommandSpec, CommandStatus, Handler, HandlerFuture, lookup};
pub use parser::tokenize;
