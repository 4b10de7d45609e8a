//! Configuration management for the RAX file manager
//!
//! Built-in defaults overlaid by `RAX_FM_*` environment variables. There is no
//! configuration file; nothing is persisted between runs.

use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;
use std::path::PathBuf;

use crate::system::home_dir;

const ENV_PREFIX: &str = "RAX_FM";

pub const DEFAULT_USERNAME: &str = "Anonymous";
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;
pub const DEFAULT_MAX_COMMAND_LENGTH: usize = 4096;

/// Complete shell configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    /// Directory the session is confined to; the home directory when unset
    /// Environment: RAX_FM_ROOT_DIR
    pub root_dir: Option<String>,

    /// Name used when `--username` is missing or malformed
    pub default_username: String,

    /// Chunk size for streaming file content
    pub buffer_size: usize,

    /// Longer input lines are rejected as invalid input
    pub max_command_length: usize,

    /// ANSI styling of error and status lines
    pub colors: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            default_username: DEFAULT_USERNAME.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_command_length: DEFAULT_MAX_COMMAND_LENGTH,
            colors: true,
        }
    }
}

impl ShellConfig {
    /// Load configuration from defaults with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Load configuration from defaults overlaid by `source`
    pub fn load_with<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("default_username", DEFAULT_USERNAME)?
            .set_default("buffer_size", DEFAULT_BUFFER_SIZE as u64)?
            .set_default("max_command_length", DEFAULT_MAX_COMMAND_LENGTH as u64)?
            .set_default("colors", true)?
            .add_source(source)
            .build()?;

        let config: ShellConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.default_username.trim().is_empty() {
            return Err(ConfigError::Message(
                "default_username cannot be empty".into(),
            ));
        }

        if matches!(&self.root_dir, Some(dir) if dir.trim().is_empty()) {
            return Err(ConfigError::Message("root_dir cannot be empty".into()));
        }

        Ok(())
    }

    /// Root directory before canonicalization; `None` when no root is
    /// configured and the home directory cannot be determined
    pub fn root_dir_path(&self) -> Option<PathBuf> {
        match &self.root_dir {
            Some(dir) => Some(PathBuf::from(dir)),
            None => home_dir(),
        }
    }
}
