use serde::Deserialize;
use std::{fs, path::Path};

use crate::errors::ConfigError;

/// How concurrent mutations of one collection are coordinated.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Each collection holds a lock across load + transform + replace.
    #[default]
    Serialized,

    /// No locking at all. Concurrent writers race and the last one wins.
    Unguarded,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// HTTP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to the visits JSON array.
    #[serde(default = "default_visits_path")]
    pub visits_path: String,

    /// Path to the data items JSON array.
    #[serde(default = "default_data_path")]
    pub data_path: String,

    #[serde(default)]
    pub write_mode: WriteMode,

    /// Write to a temp file and rename over the target instead of
    /// truncating the collection file in place.
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_visits_path() -> String {
    "data/visits.json".to_string()
}

fn default_data_path() -> String {
    "data/data.json".to_string()
}

fn default_atomic_writes() -> bool {
    true
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json_str(&file)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<AppConfig>(json).map_err(ConfigError::Parse)
    }
}
