//! CLI command implementations

pub mod config;
pub mod lookup;
pub mod post;
pub mod settings;
pub mod show;

pub use config::execute as config;
pub use lookup::execute as lookup;
pub use settings::execute as settings;
pub use show::execute as show;

use crate::api::{ApiClient, UreqTransport};
use crate::cache::PageCache;
use crate::config::Config;
use crate::error::HarmlessResult;
use crate::popup::Popup;
use crate::store::Stores;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Loaded configuration plus the opened stores
pub struct App {
    pub config: Config,
    pub stores: Stores,
}

impl App {
    /// Open the stores under `store_dir`
    pub fn open(config: Config, store_dir: &Path) -> HarmlessResult<Self> {
        debug!("Opening stores in {}", store_dir.display());
        let stores = Stores::open(store_dir)?;
        Ok(Self { config, stores })
    }

    pub fn cache(&self) -> PageCache {
        PageCache::new(Arc::clone(&self.stores.cache))
    }

    /// Client talking to the configured site over HTTP
    pub fn client(&self) -> HarmlessResult<ApiClient> {
        let transport = Arc::new(UreqTransport::new(self.config.api.user_agent.clone()));
        ApiClient::new(self.config.api.clone(), transport, &self.stores)
    }

    pub fn popup(&self) -> Popup {
        Popup::new(
            self.cache(),
            Arc::clone(&self.stores.settings),
            self.config.api.origin(),
        )
    }
}
