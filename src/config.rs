//! Runtime configuration read from the environment.

use std::path::PathBuf;

pub const DB_ENV: &str = "TASKBOARD_DB";
pub const LOG_DIR_ENV: &str = "TASKBOARD_LOG_DIR";
pub const APP_NAME: &str = "TaskBoard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file, or `:memory:`
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("taskboard.db"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: lookup(DB_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_dir: lookup(LOG_DIR_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }
}
