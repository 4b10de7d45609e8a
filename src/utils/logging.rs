//! Logging utilities
//!
//! Log lines go to stderr so they never interleave with the shell's output.

use env_logger::Env;

/// Setup logging, `RUST_LOG` overrides the default `warn` filter
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}
