//! Background glue between tab events, the API client and the badge

use crate::api::ApiClient;
use crate::badge::{BadgeController, BadgeState, Populated, TabId};
use crate::cache::CacheRecord;
use crate::error::HarmlessResult;
use crate::util;
use tracing::{debug, info};

/// Tab update notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabUpdate {
    /// Loading status reported by the host (`"loading"`, `"complete"`, ...)
    pub status: String,
    pub url: String,
}

impl TabUpdate {
    pub fn loading(url: impl Into<String>) -> Self {
        Self {
            status: "loading".to_string(),
            url: url.into(),
        }
    }
}

/// Whether pages at `url` can be looked up at all
pub fn is_supported_page(url: &str) -> bool {
    matches!(util::parse_url(url).protocol.as_str(), "http" | "https")
}

pub struct Background {
    client: ApiClient,
    badge: BadgeController,
}

impl Background {
    pub fn new(client: ApiClient, badge: BadgeController) -> Self {
        Self { client, badge }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn badge(&self) -> &BadgeController {
        &self.badge
    }

    /// A new tab starts with the default badge until it navigates
    pub fn tab_opened(&self, tab_id: TabId) {
        self.badge.set_defaults(tab_id);
    }

    /// React to a tab update.
    ///
    /// Only `loading` updates are handled. Unsupported pages get the
    /// ignored badge; a missing or expired cache record triggers a lookup,
    /// otherwise the badge is drawn from the cache.
    pub async fn prepare_browser_action(
        &self,
        tab_id: TabId,
        update: &TabUpdate,
    ) -> HarmlessResult<Option<BadgeState>> {
        if update.status != "loading" {
            return Ok(None);
        }

        if !is_supported_page(&update.url) {
            debug!("Tab {} on unsupported page {}", tab_id, update.url);
            self.badge.set_ignore(tab_id);
            return Ok(Some(BadgeState::Ignored));
        }

        let settings = self.client.settings()?;
        match self.client.cache().record(&update.url)? {
            Some(record) if !settings.cache_expired(record.cache_date, util::epoch()) => {
                self.badge.set_for(&update.url, tab_id).map(Some)
            }
            Some(_) => {
                info!("Cache for {} expired", update.url);
                self.lookup(tab_id, &update.url).await
            }
            None => self.lookup(tab_id, &update.url).await,
        }
    }

    /// Toolbar button pressed on a tab showing `url`
    pub async fn button_clicked(&self, tab_id: TabId, url: &str) -> HarmlessResult<CacheRecord> {
        self.client.get_info(url, tab_id, &self.badge).await
    }

    async fn lookup(&self, tab_id: TabId, url: &str) -> HarmlessResult<Option<BadgeState>> {
        let record = self.client.get_info(url, tab_id, &self.badge).await?;
        Ok(Some(BadgeState::Populated(Populated::from_record(&record))))
    }
}
