//! Configuration schema for Mostly Harmless
//!
//! Configuration is stored at `~/.config/mostly-harmless/config.toml`.
//! Extension settings (cache time, timeout, freshness) live in the
//! `settings` store instead, see [`crate::store::Settings`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Remote API settings
    pub api: ApiConfig,

    /// Persistent store settings
    pub store: StoreConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base domain of the reddit-powered site
    pub domain: String,

    /// URL scheme used for API requests
    pub scheme: String,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl ApiConfig {
    /// Origin (`scheme://domain`) requests are sent to
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.domain)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            domain: "www.reddit.com".to_string(),
            scheme: "https".to_string(),
            user_agent: concat!("mostly-harmless/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Persistent store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding `settings.json` and `cache.json` (defaults to the state dir)
    pub dir: Option<PathBuf>,
}
