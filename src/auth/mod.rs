//! User identification
//!
//! Startup argument parsing and resolution of the session's user name.

pub mod args;
pub mod validator;

pub use args::Args;
pub use validator::resolve_username;
