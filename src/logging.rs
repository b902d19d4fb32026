//! File-backed logging.
//!
//! The TUI owns stdout/stderr while the alternate screen is up, so log
//! records go to a file. Logging stays off unless a log file is given on
//! the command line or `RUST_LOG` is set.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::app_dirs::AppDirs;

/// Where logs should go, if anywhere
pub fn log_target(explicit: Option<&Path>, rust_log_set: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if rust_log_set => AppDirs::log_path(),
        None => None,
    }
}

/// Install the global logger. Returns the file being written, if any.
pub fn init(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let Some(path) = log_target(explicit, rust_log_set) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("installing logger")?;

    Ok(Some(path))
}
