//! RAX File Manager - Entry Point
//!
//! An interactive shell for browsing and managing files inside your home
//! directory.

use log::{error, info};

use rax_file_manager::Shell;
use rax_file_manager::ShellConfig;
use rax_file_manager::auth::{Args, resolve_username};
use rax_file_manager::utils::logging::setup_logging;

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse_lenient(std::env::args_os());

    let config = match ShellConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("rax-file-manager: invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let user_name = resolve_username(args.username.as_deref(), &config.default_username);
    info!("Launching file manager for {}...", user_name);

    let shell = match Shell::new(config, user_name).await {
        Ok(shell) => shell,
        Err(e) => {
            error!("Failed to open root directory: {}", e);
            eprintln!("rax-file-manager: cannot open root directory: {e}");
            std::process::exit(1);
        }
    };

    shell.start().await;

    // The stdin reader may still be parked on a blocking read.
    std::process::exit(0);
}
