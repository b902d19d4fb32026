use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::notify::NotificationKind;

pub const DEFAULT_TICK_MILLIS: u64 = 1000;

/// Startup configuration. Read once; never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub notification: NotificationKind,
    pub tick_millis: u64,
    pub show_end_time: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notification: NotificationKind::Bell,
            tick_millis: DEFAULT_TICK_MILLIS,
            show_end_time: true,
        }
    }
}

impl Config {
    /// Tick period, never shorter than one millisecond
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "pomo") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("pomo_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Config::default(),
            Err(err) => {
                warn!("could not read {}: {err}", self.path.display());
                return Config::default();
            }
        };

        serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|err| {
            warn!("ignoring malformed config {}: {err}", self.path.display());
            Config::default()
        })
    }
}
