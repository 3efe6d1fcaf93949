//! Unified path management for tolk configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/tolk/              # Config directory (platform equivalent elsewhere)
//! ├── config.toml              # Optional overrides of the built-in settings
//! └── logs/                    # Desktop application logs
//!     └── tolk-desktop.log.YYYY-MM-DD
//! ```
//!
//! The transcript and the prompting tips file are resolved relative to the
//! working directory, as configured in `TolkConfig`.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_DIR: &str = "tolk";

pub struct TolkPaths;

impl TolkPaths {
    /// Returns the tolk configuration directory (e.g. `~/.config/tolk/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the optional configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory for rolling log files.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
