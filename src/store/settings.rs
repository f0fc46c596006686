//! Typed view over the `settings` store

use super::Store;
use crate::error::{HarmlessError, HarmlessResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// `timeoutLength` value that disables the request timeout
pub const TIMEOUT_DISABLED: u64 = 16;

/// `freshCutoff` value that disables the staleness check
pub const FRESHNESS_DISABLED: u64 = 91;

const SECONDS_PER_HOUR: i64 = 60 * 60;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Extension settings as persisted in the `settings` store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Hours a cached lookup is reused before re-fetching
    pub cache_time: u64,

    /// Request timeout in seconds ([`TIMEOUT_DISABLED`] disables it)
    pub timeout_length: u64,

    /// Days after which a submission is shown as stale ([`FRESHNESS_DISABLED`] disables it)
    pub fresh_cutoff: u64,

    /// Popup width in pixels
    pub popup_width: u32,

    /// Append the extension footer to submitted comments
    pub shameless_plug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_time: 3,
            timeout_length: 5,
            fresh_cutoff: 7,
            popup_width: 640,
            shameless_plug: false,
        }
    }
}

impl Settings {
    /// Setting keys, in display order
    pub const KEYS: [&'static str; 5] = [
        "cacheTime",
        "timeoutLength",
        "freshCutoff",
        "popupWidth",
        "shamelessPlug",
    ];

    /// Defaults mapping used to open the settings store
    pub fn defaults() -> Map<String, Value> {
        match serde_json::to_value(Self::default()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Read every setting from `store`
    pub fn load(store: &Store) -> HarmlessResult<Self> {
        let map: Map<String, Value> = Self::KEYS
            .iter()
            .filter_map(|key| store.get(key).map(|value| (key.to_string(), value)))
            .collect();

        serde_json::from_value(Value::Object(map))
            .map_err(|e| HarmlessError::User(format!("Invalid settings in store: {}", e)))
    }

    /// Check that `value` is acceptable for `key` without writing it
    pub fn validate_entry(&self, key: &str, value: &Value) -> HarmlessResult<()> {
        if !Self::KEYS.contains(&key) {
            return Err(HarmlessError::User(format!("Unknown setting: {}", key)));
        }

        let mut map = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => return Err(HarmlessError::Internal("settings did not serialize to an object".into())),
        };
        map.insert(key.to_string(), value.clone());

        serde_json::from_value::<Self>(Value::Object(map))
            .map(|_| ())
            .map_err(|e| HarmlessError::User(format!("Invalid value for {}: {}", key, e)))
    }

    /// Request timeout, or `None` when disabled by the sentinel
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.timeout_length == TIMEOUT_DISABLED {
            None
        } else {
            Some(Duration::from_secs(self.timeout_length))
        }
    }

    /// Whether a submission created at `created_utc` still counts as fresh at `now`
    pub fn is_fresh(&self, created_utc: f64, now: i64) -> bool {
        if self.fresh_cutoff == FRESHNESS_DISABLED {
            return true;
        }
        let cutoff = now.saturating_sub(saturating_secs(self.fresh_cutoff, SECONDS_PER_DAY));
        created_utc >= cutoff as f64
    }

    /// Whether a cache record fetched at `cache_date` must be re-fetched at `now`
    pub fn cache_expired(&self, cache_date: i64, now: i64) -> bool {
        now.saturating_sub(cache_date) > saturating_secs(self.cache_time, SECONDS_PER_HOUR)
    }
}

fn saturating_secs(count: u64, unit: i64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX).saturating_mul(unit)
}
