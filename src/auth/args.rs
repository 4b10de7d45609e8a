//! Startup arguments

use clap::Parser;

/// RAX file manager - interactive shell confined to your home directory
#[derive(Parser, Debug, Default)]
#[command(name = "rax-file-manager", version, about)]
pub struct Args {
    /// Name shown in the greeting and farewell
    #[arg(long)]
    pub username: Option<String>,
}

impl Args {
    /// Parses startup arguments, never failing: anything malformed yields
    /// the defaults.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).unwrap_or_default()
    }
}
