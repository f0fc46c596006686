//! Persistent key-value stores
//!
//! A [`Store`] maps string keys to arbitrary JSON values. It is loaded
//! from `<dir>/<name>.json` into an in-memory mirror when opened, and
//! every [`Store::set`] writes the whole mirror back before returning.
//! There is no expiry, no size bound and no eviction.
//!
//! Two named instances exist, bundled in [`Stores`]:
//! - `settings`, opened with [`Settings`] defaults
//! - `cache`, opened without defaults (keys are page URLs plus `modhash`)

mod settings;

pub use settings::{Settings, FRESHNESS_DISABLED, TIMEOUT_DISABLED};

use crate::error::{HarmlessError, HarmlessResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Name of the settings store
pub const SETTINGS_STORE: &str = "settings";

/// Name of the cache store
pub const CACHE_STORE: &str = "cache";

/// A named, file-backed key-value store with optional defaults
#[derive(Debug)]
pub struct Store {
    name: String,
    path: PathBuf,
    defaults: Map<String, Value>,
    entries: RwLock<Map<String, Value>>,
}

impl Store {
    /// Open (or create) the store `name` inside `dir`
    pub fn open(dir: &Path, name: &str, defaults: Map<String, Value>) -> HarmlessResult<Self> {
        let path = dir.join(format!("{}.json", name));

        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                HarmlessError::io(format!("reading store file {}", path.display()), e)
            })?;
            match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => map,
                other => {
                    return Err(HarmlessError::StorePersist {
                        name: name.to_string(),
                        reason: format!("expected a JSON object, found {}", json_kind(&other)),
                    })
                }
            }
        } else {
            Map::new()
        };

        debug!("Opened store {} with {} entries", name, entries.len());

        Ok(Self {
            name: name.to_string(),
            path,
            defaults,
            entries: RwLock::new(entries),
        })
    }

    /// Store name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the value for `key`, falling back to the defaults
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .or_else(|| self.defaults.get(key))
            .cloned()
    }

    /// Set `key` to `value` and persist the store before returning
    pub fn set(&self, key: &str, value: Value) -> HarmlessResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let mut updated = entries.clone();
        updated.insert(key.to_string(), value);
        self.persist(&updated)?;
        *entries = updated;

        debug!("Store {} set {}", self.name, key);
        Ok(())
    }

    /// Get and deserialize the value for `key`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> HarmlessResult<Option<T>> {
        match self.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`
    pub fn set_as<T: Serialize>(&self, key: &str, value: &T) -> HarmlessResult<()> {
        self.set(key, serde_json::to_value(value)?)
    }

    /// Persisted keys in insertion order (defaults are not included)
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.keys().cloned().collect()
    }

    fn persist(&self, entries: &Map<String, Value>) -> HarmlessResult<()> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, content).map_err(|e| HarmlessError::StorePersist {
            name: self.name.clone(),
            reason: format!("writing {}: {}", tmp.display(), e),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| HarmlessError::StorePersist {
            name: self.name.clone(),
            reason: format!("replacing {}: {}", self.path.display(), e),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The two process-wide store instances, opened in dependency order
#[derive(Debug, Clone)]
pub struct Stores {
    /// Extension settings with defaults
    pub settings: Arc<Store>,

    /// Page cache and session modhash
    pub cache: Arc<Store>,
}

impl Stores {
    /// Open both stores inside `dir`, creating it if needed
    pub fn open(dir: &Path) -> HarmlessResult<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| HarmlessError::io(format!("creating store directory {}", dir.display()), e))?;

        let settings = Store::open(dir, SETTINGS_STORE, Settings::defaults())?;
        let cache = Store::open(dir, CACHE_STORE, Map::new())?;

        Ok(Self {
            settings: Arc::new(settings),
            cache: Arc::new(cache),
        })
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> HarmlessResult<Settings> {
        Settings::load(&self.settings)
    }
}
