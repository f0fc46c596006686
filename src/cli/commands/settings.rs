//! Settings command - inspect and change the extension settings store

use super::App;
use crate::cli::args::{SettingsAction, SettingsArgs};
use crate::error::{HarmlessError, HarmlessResult};
use crate::store::{Settings, Store, FRESHNESS_DISABLED, TIMEOUT_DISABLED};
use crate::ui::{self, UiContext};
use serde_json::Value;

/// Execute the settings command
pub async fn execute(args: SettingsArgs, app: &App) -> HarmlessResult<()> {
    let store = &app.stores.settings;

    match args.action {
        None | Some(SettingsAction::Show) => show_settings(store),
        Some(SettingsAction::Get { key }) => {
            known_key(&key)?;
            let value = store.get(&key).unwrap_or(Value::Null);
            println!("{}", value);
            Ok(())
        }
        Some(SettingsAction::Set { key, value }) => set_setting(store, &key, &value),
    }
}

fn show_settings(store: &Store) -> HarmlessResult<()> {
    let ctx = UiContext::detect();
    let settings = Settings::load(store)?;

    ui::key_value(&ctx, "cacheTime", &format!("{} hours", settings.cache_time));
    ui::key_value(&ctx, "timeoutLength", &describe(settings.timeout_length, TIMEOUT_DISABLED, "seconds", "no timeout"));
    ui::key_value(&ctx, "freshCutoff", &describe(settings.fresh_cutoff, FRESHNESS_DISABLED, "days", "never stale"));
    ui::key_value(&ctx, "popupWidth", &format!("{} px", settings.popup_width));
    ui::key_value(&ctx, "shamelessPlug", &settings.shameless_plug.to_string());
    ui::remark(&ctx, &format!("Stored in {}", store.path().display()));
    Ok(())
}

fn describe(value: u64, sentinel: u64, unit: &str, disabled: &str) -> String {
    if value == sentinel {
        format!("{} ({})", value, disabled)
    } else {
        format!("{} {}", value, unit)
    }
}

fn known_key(key: &str) -> HarmlessResult<()> {
    if Settings::KEYS.contains(&key) {
        Ok(())
    } else {
        Err(HarmlessError::User(format!(
            "Unknown setting: {} (valid: {})",
            key,
            Settings::KEYS.join(", ")
        )))
    }
}

/// Parse a CLI value as JSON, falling back to a plain string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn set_setting(store: &Store, key: &str, raw: &str) -> HarmlessResult<()> {
    known_key(key)?;
    let value = parse_value(raw);

    Settings::load(store)?.validate_entry(key, &value)?;
    store.set(key, value)?;

    ui::step_ok(&UiContext::detect(), &format!("Set {} = {}", key, raw));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn settings_store(temp: &TempDir) -> Store {
        Store::open(temp.path(), "settings", Settings::defaults()).unwrap()
    }

    #[test]
    fn parse_value_prefers_json() {
        assert_eq!(parse_value("16"), json!(16));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("hello"), json!("hello"));
    }

    #[test]
    fn set_setting_persists() {
        let temp = TempDir::new().unwrap();
        let store = settings_store(&temp);

        set_setting(&store, "timeoutLength", "16").unwrap();

        assert_eq!(Settings::load(&store).unwrap().timeout_length, TIMEOUT_DISABLED);
        let reopened = settings_store(&temp);
        assert_eq!(reopened.get("timeoutLength"), Some(json!(16)));
    }

    #[test]
    fn set_setting_rejects_bad_values() {
        let temp = TempDir::new().unwrap();
        let store = settings_store(&temp);

        assert!(set_setting(&store, "cacheTime", "soon").is_err());
        assert!(set_setting(&store, "colour", "red").is_err());
        assert_eq!(store.get("cacheTime"), Some(json!(3)));
    }

    #[test]
    fn describe_marks_sentinels() {
        assert_eq!(describe(16, TIMEOUT_DISABLED, "seconds", "no timeout"), "16 (no timeout)");
        assert_eq!(describe(5, TIMEOUT_DISABLED, "seconds", "no timeout"), "5 seconds");
    }
}
