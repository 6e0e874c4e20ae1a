use serde::{Deserialize, Serialize};

use super::registry::ModelRegistry;
use crate::error::MacroInsightError;

pub const DEFAULT_MODEL_NAME: &str = "deepseek-chat";
pub const DEFAULT_MODEL_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// A named chat-completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Model identifier, also sent as the `model` field of the request body
    pub name: String,
    /// Full URL of the chat completions endpoint
    pub api_url: String,
    /// Per-model API key; may be empty
    #[serde(default)]
    pub api_key: String,
}

impl ModelConfig {
    pub fn new(name: impl Into<String>, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

pub fn default_models() -> Vec<ModelConfig> {
    vec![ModelConfig::new(DEFAULT_MODEL_NAME, DEFAULT_MODEL_URL, "")]
}

/// On-disk shape of the settings blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSettings {
    pub api_key: String,
    pub selected_model: Option<ModelConfig>,
    pub available_models: Vec<ModelConfig>,
    pub detailed_analysis: bool,
    pub include_charts: bool,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Settings::default().into()
    }
}

/// User settings: current credential, model registry and display toggles.
///
/// Serializes as [`PersistedSettings`], which is also the shape the
/// frontend receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PersistedSettings", into = "PersistedSettings")]
pub struct Settings {
    pub api_key: String,
    pub models: ModelRegistry,
    pub detailed_analysis: bool,
    pub include_charts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            models: ModelRegistry::default(),
            detailed_analysis: true,
            include_charts: true,
        }
    }
}

impl From<PersistedSettings> for Settings {
    fn from(p: PersistedSettings) -> Self {
        Self {
            api_key: p.api_key,
            models: ModelRegistry::from_parts(p.available_models, p.selected_model.as_ref()),
            detailed_analysis: p.detailed_analysis,
            include_charts: p.include_charts,
        }
    }
}

impl From<Settings> for PersistedSettings {
    fn from(s: Settings) -> Self {
        Self {
            selected_model: Some(s.models.selected().clone()),
            available_models: s.models.models().to_vec(),
            api_key: s.api_key,
            detailed_analysis: s.detailed_analysis,
            include_charts: s.include_charts,
        }
    }
}

impl Settings {
    /// Update the current credential and the selected model's key together.
    pub fn set_api_key(&mut self, key: &str) {
        self.api_key = key.to_string();
        self.models.set_selected_api_key(key);
    }

    /// Select a model; a model carrying its own key becomes the current credential.
    pub fn select_model(&mut self, name: &str) -> Result<(), MacroInsightError> {
        let model = self.models.select(name)?;
        if !model.api_key.is_empty() {
            self.api_key = model.api_key.clone();
        }
        Ok(())
    }

    pub fn add_model(&mut self, model: ModelConfig) {
        self.models.add(model);
    }

    pub fn remove_model(&mut self, name: &str) -> Result<(), MacroInsightError> {
        self.models.remove(name)
    }

    pub fn set_display_options(&mut self, detailed_analysis: bool, include_charts: bool) {
        self.detailed_analysis = detailed_analysis;
        self.include_charts = include_charts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.api_key.is_empty());
        assert!(settings.detailed_analysis);
        assert!(settings.include_charts);
        assert_eq!(settings.models.selected().name, DEFAULT_MODEL_NAME);
        assert_eq!(settings.models.selected().api_url, DEFAULT_MODEL_URL);
    }

    #[test]
    fn test_serializes_as_camel_case_blob() {
        let mut settings = Settings::default();
        settings.set_api_key("sk-test");
        let json = serde_json::to_value(&settings).unwrap();

        assert_eq!(json["apiKey"], "sk-test");
        assert_eq!(json["selectedModel"]["name"], DEFAULT_MODEL_NAME);
        assert_eq!(json["selectedModel"]["apiKey"], "sk-test");
        assert_eq!(json["availableModels"][0]["apiUrl"], DEFAULT_MODEL_URL);
        assert_eq!(json["detailedAnalysis"], true);
        assert_eq!(json["includeCharts"], true);
    }

    #[test]
    fn test_round_trip_keeps_selection() {
        let mut settings = Settings::default();
        settings.add_model(ModelConfig::new("gpt-4o", "https://api.openai.com/v1/chat/completions", "sk-o"));
        settings.add_model(ModelConfig::new("qwen-max", "https://dashscope.example/v1/chat/completions", ""));
        settings.select_model("gpt-4o").unwrap();
        settings.set_display_options(false, true);

        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
        assert_eq!(restored.models.selected().name, "gpt-4o");
        assert!(!restored.detailed_analysis);
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let restored: Settings = serde_json::from_str(r#"{"apiKey": "sk-1"}"#).unwrap();
        assert_eq!(restored.api_key, "sk-1");
        assert_eq!(restored.models.len(), 1);
        assert!(restored.include_charts);
    }

    #[test]
    fn test_empty_registry_is_repaired() {
        let restored: Settings =
            serde_json::from_str(r#"{"availableModels": [], "selectedModel": null}"#).unwrap();
        assert_eq!(restored.models.selected().name, DEFAULT_MODEL_NAME);
    }

    #[test]
    fn test_set_api_key_updates_selected_model() {
        let mut settings = Settings::default();
        settings.add_model(ModelConfig::new("claude", "https://example.com/v1/chat", ""));
        settings.set_api_key("sk-new");

        assert_eq!(settings.api_key, "sk-new");
        assert_eq!(settings.models.selected().api_key, "sk-new");
        // other entries keep their own key
        assert_eq!(settings.models.models()[0].api_key, "");
    }

    #[test]
    fn test_empty_api_key_clears_credential() {
        let mut settings = Settings::default();
        settings.set_api_key("sk-old");
        settings.set_api_key("");

        assert_eq!(settings.api_key, "");
        assert_eq!(settings.models.selected().api_key, "");
        assert_eq!(PersistedSettings::from(settings).api_key, "");
    }

    #[test]
    fn test_select_model_takes_over_its_key() {
        let mut settings = Settings::default();
        settings.set_api_key("sk-deepseek");
        settings.add_model(ModelConfig::new("keyed", "https://a.example/v1", "sk-keyed"));
        settings.add_model(ModelConfig::new("keyless", "https://b.example/v1", ""));

        settings.select_model("keyed").unwrap();
        assert_eq!(settings.api_key, "sk-keyed");

        // a model without its own key leaves the current credential alone
        settings.select_model("keyless").unwrap();
        assert_eq!(settings.api_key, "sk-keyed");
        assert_eq!(settings.models.selected().name, "keyless");
    }
}
