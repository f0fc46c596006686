//! Configuration management for Mostly Harmless

pub mod schema;

pub use schema::Config;

use crate::error::{HarmlessError, HarmlessResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mostly-harmless")
            .join("config.toml")
    }

    /// Get the state directory path
    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mostly-harmless")
    }

    /// Resolve the directory holding the persistent stores.
    ///
    /// An explicit override (CLI flag or environment) wins over the
    /// config file, which wins over the default state dir.
    pub fn store_dir(config: &Config, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| config.store.dir.clone())
            .unwrap_or_else(Self::state_dir)
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> HarmlessResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> HarmlessResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| HarmlessError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| HarmlessError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> HarmlessResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            HarmlessError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> HarmlessResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HarmlessError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.api.domain, "www.reddit.com");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.api.domain = "old.reddit.com".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.api.domain, "old.reddit.com");
    }

    #[tokio::test]
    async fn invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[api\ndomain = ").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, HarmlessError::ConfigInvalid { path: p, .. } if p == path));
    }

    #[test]
    fn store_dir_precedence() {
        let mut config = Config::default();
        config.store.dir = Some(PathBuf::from("/from/config"));

        let dir = ConfigManager::store_dir(&config, Some(Path::new("/from/flag")));
        assert_eq!(dir, PathBuf::from("/from/flag"));

        let dir = ConfigManager::store_dir(&config, None);
        assert_eq!(dir, PathBuf::from("/from/config"));

        let dir = ConfigManager::store_dir(&Config::default(), None);
        assert_eq!(dir, ConfigManager::state_dir());
    }
}
