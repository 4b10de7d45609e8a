//! Error rendering
//!
//! Turns a failed command into the single line shown to the user.

use log::debug;

use crate::command::responses::{INVALID_INPUT, OPERATION_FAILED};
use crate::error::types::ShellError;

/// Render a command failure for the error line.
///
/// `InvalidInput` stays generic; every other kind carries its message.
pub fn render_error(err: &ShellError) -> String {
    debug!("Command failed: {:?}", err);
    match err {
        ShellError::InvalidInput => INVALID_INPUT.to_string(),
        other => format!("{OPERATION_FAILED}: {other}"),
    }
}
