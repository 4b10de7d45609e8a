//! Operating system queries behind the `os` command

use std::env;
use std::path::PathBuf;
use sysinfo::System;

use crate::error::{ShellError, ShellResult};

/// One of the flags accepted by `os`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsQuery {
    Eol,
    Cpus,
    HomeDir,
    UserName,
    Architecture,
}

impl OsQuery {
    pub fn parse(flag: &str) -> ShellResult<Self> {
        match flag {
            "--EOL" => Ok(OsQuery::Eol),
            "--cpus" => Ok(OsQuery::Cpus),
            "--homedir" => Ok(OsQuery::HomeDir),
            "--username" => Ok(OsQuery::UserName),
            "--architecture" => Ok(OsQuery::Architecture),
            _ => Err(ShellError::InvalidInput),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    pub model: String,
    pub speed_ghz: f64,
}

/// Platform line terminator
pub fn eol() -> &'static str {
    if cfg!(windows) { "\r\n" } else { "\n" }
}

/// Home directory of the process owner.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Login name of the process owner.
pub fn system_user_name() -> Option<String> {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
}

pub fn architecture() -> &'static str {
    env::consts::ARCH
}

/// Model and current clock of every logical CPU.
pub fn cpus() -> Vec<CpuInfo> {
    let mut system = System::new();
    system.refresh_cpu();

    system
        .cpus()
        .iter()
        .map(|cpu| CpuInfo {
            model: cpu.brand().trim().to_string(),
            speed_ghz: cpu.frequency() as f64 / 1000.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        assert_eq!(OsQuery::parse("--EOL").unwrap(), OsQuery::Eol);
        assert_eq!(OsQuery::parse("--cpus").unwrap(), OsQuery::Cpus);
        assert_eq!(OsQuery::parse("--architecture").unwrap(), OsQuery::Architecture);
        assert!(matches!(OsQuery::parse("--eol"), Err(ShellError::InvalidInput)));
        assert!(matches!(OsQuery::parse("cpus"), Err(ShellError::InvalidInput)));
    }

    #[test]
    fn test_eol_matches_platform() {
        assert!(eol() == "\n" || eol() == "\r\n");
    }

    #[test]
    fn test_architecture_is_known() {
        assert!(!architecture().is_empty());
    }
}
