//! Read-only lookups about the host system

pub mod os;

pub use os::{CpuInfo, OsQuery, architecture, cpus, eol, home_dir, system_user_name};
