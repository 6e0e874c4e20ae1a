//! Settings persistence through `tauri-plugin-store`.
//!
//! The whole settings object lives under a single key so it is read once at
//! startup and rewritten on every change.

use serde_json::Value;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::{info, warn};

use super::types::Settings;
use crate::error::MacroInsightError;

pub const STORE_FILE: &str = "macroinsight-storage.json";
pub const SETTINGS_KEY: &str = "settings";

/// Decode a stored blob, falling back to defaults for a missing or corrupt one.
pub fn settings_from_value(value: Option<Value>) -> Settings {
    match value {
        None => {
            info!("No saved settings, using defaults");
            Settings::default()
        }
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Saved settings are unreadable ({}), using defaults", e);
            Settings::default()
        }),
    }
}

pub fn settings_to_value(settings: &Settings) -> Result<Value, MacroInsightError> {
    serde_json::to_value(settings).map_err(|e| MacroInsightError::Store(e.to_string()))
}

/// Load settings from the app store.
pub fn load_settings(app: &AppHandle) -> Settings {
    match app.store(STORE_FILE) {
        Ok(store) => settings_from_value(store.get(SETTINGS_KEY)),
        Err(e) => {
            warn!("Failed to open store {}: {}", STORE_FILE, e);
            Settings::default()
        }
    }
}

/// Write settings to the app store and flush it to disk.
pub fn save_settings(app: &AppHandle, settings: &Settings) -> Result<(), MacroInsightError> {
    let store = app.store(STORE_FILE).map_err(|e| {
        warn!("Failed to open store: {}", e);
        MacroInsightError::Store(e.to_string())
    })?;
    store.set(SETTINGS_KEY, settings_to_value(settings)?);
    store.save().map_err(|e| {
        warn!("Failed to save store: {}", e);
        MacroInsightError::Store(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::types::ModelConfig;

    #[test]
    fn test_missing_blob_gives_defaults() {
        assert_eq!(settings_from_value(None), Settings::default());
    }

    #[test]
    fn test_corrupt_blob_gives_defaults() {
        let value = serde_json::json!({"availableModels": "not a list"});
        assert_eq!(settings_from_value(Some(value)), Settings::default());
    }

    #[test]
    fn test_round_trip_through_value() {
        let mut settings = Settings::default();
        settings.add_model(ModelConfig::new("gpt-4o", "https://api.openai.com/v1/chat/completions", ""));
        settings.set_api_key("sk-x");
        settings.set_display_options(true, false);

        let value = settings_to_value(&settings).unwrap();
        assert_eq!(settings_from_value(Some(value)), settings);
    }

    #[test]
    fn test_reads_blob_written_by_hand() {
        let value = serde_json::json!({
            "apiKey": "sk-abc",
            "selectedModel": {"name": "b", "apiUrl": "https://b.example", "apiKey": "sk-abc"},
            "availableModels": [
                {"name": "a", "apiUrl": "https://a.example", "apiKey": ""},
                {"name": "b", "apiUrl": "https://b.example", "apiKey": "sk-abc"}
            ],
            "detailedAnalysis": false,
            "includeCharts": true
        });
        let settings = settings_from_value(Some(value));
        assert_eq!(settings.api_key, "sk-abc");
        assert_eq!(settings.models.selected().name, "b");
        assert!(!settings.detailed_analysis);
    }
}
