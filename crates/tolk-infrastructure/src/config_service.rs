//! Configuration service implementation.
//!
//! Loads `TolkConfig` from `~/.config/tolk/config.toml`. The file is
//! optional: when it is missing or malformed the built-in defaults apply.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tolk_core::config::TolkConfig;
use tolk_core::{Result, TolkError};

use crate::paths::TolkPaths;

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<TolkConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file location.
    pub fn new() -> Self {
        Self {
            path: TolkPaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> TolkConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigService] Using default configuration: {}", e);
                TolkConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_config(&self) -> Result<TolkConfig> {
        let Some(path) = self.path.as_ref() else {
            return Err(TolkError::config("config directory could not be determined"));
        };

        if !path.exists() {
            tracing::debug!("[ConfigService] No config file at {:?}", path);
            return Ok(TolkConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: TolkConfig = toml::from_str(&content)?;
        tracing::info!("[ConfigService] Loaded configuration from {:?}", path);
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
