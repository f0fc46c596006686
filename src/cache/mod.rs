//! Page cache
//!
//! Typed facade over the `cache` store. Page URLs map to [`CacheRecord`]s;
//! the reserved `modhash` key holds the session's anti-forgery token.
//! Records are only ever replaced wholesale (read-modify-write); nothing
//! is deleted or evicted.

mod record;

#[cfg(test)]
pub(crate) use record::fixtures;
pub use record::{CacheRecord, PostEntry, VoteDir};

use crate::error::{HarmlessError, HarmlessResult};
use crate::store::Store;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Reserved cache key for the session token
pub const MODHASH_KEY: &str = "modhash";

/// Typed access to the `cache` store
#[derive(Debug, Clone)]
pub struct PageCache {
    store: Arc<Store>,
}

impl PageCache {
    /// Wrap the `cache` store
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Cached record for `url`, if any
    pub fn record(&self, url: &str) -> HarmlessResult<Option<CacheRecord>> {
        self.store.get_as(url)
    }

    /// Cached record for `url`, or [`HarmlessError::NotCached`]
    pub fn require_record(&self, url: &str) -> HarmlessResult<CacheRecord> {
        self.record(url)?
            .ok_or_else(|| HarmlessError::NotCached(url.to_string()))
    }

    /// Replace the record for `url`
    pub fn put_record(&self, url: &str, record: &CacheRecord) -> HarmlessResult<()> {
        self.store.set_as(url, record)
    }

    /// Apply `edit` to one post of the record for `url` and persist the whole record.
    ///
    /// `count` and `cacheDate` are left untouched.
    pub fn update_post<F>(&self, url: &str, fullname: &str, edit: F) -> HarmlessResult<CacheRecord>
    where
        F: FnOnce(&mut PostEntry),
    {
        let mut record = self.require_record(url)?;
        let entry = record
            .posts
            .get_mut(fullname)
            .ok_or_else(|| HarmlessError::UnknownPost {
                url: url.to_string(),
                fullname: fullname.to_string(),
            })?;

        edit(entry);
        self.put_record(url, &record)?;
        debug!("Updated cached post {} for {}", fullname, url);
        Ok(record)
    }

    /// Current session token; `None` before the first successful fetch
    pub fn modhash(&self) -> Option<String> {
        self.store
            .get(MODHASH_KEY)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    /// Overwrite the session token
    pub fn set_modhash(&self, modhash: Option<&str>) -> HarmlessResult<()> {
        let value = modhash.map_or(Value::Null, |m| Value::String(m.to_string()));
        self.store.set(MODHASH_KEY, value)
    }

    /// URLs with a cached record, in first-fetch order
    pub fn urls(&self) -> Vec<String> {
        self.store
            .keys()
            .into_iter()
            .filter(|k| k != MODHASH_KEY)
            .collect()
    }
}
