pub mod auth;
pub mod command;
pub mod config;
pub mod error;
pub mod navigate;
pub mod session;
pub mod shell;
pub mod storage;
pub mod system;
pub mod transfer;
pub mod utils;

pub use config::ShellConfig;
pub use error::{ShellError, ShellResult};
pub use session::{Dispatcher, Session};
pub use shell::Shell;
