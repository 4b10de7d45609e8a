//! Session management
//!
//! Holds the session state and the dispatcher that drives it.

pub mod handler;
pub mod state;

pub use handler::Dispatcher;
pub use state::Session;
