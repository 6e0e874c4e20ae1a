use tracing::info;

use super::types::{default_models, ModelConfig};
use crate::error::MacroInsightError;

/// Ordered list of model endpoints with one selected entry.
///
/// Never empty; `selected` always indexes a live entry. Names are not
/// required to be unique: lookups by name act on the first match, removal
/// drops every match.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRegistry {
    models: Vec<ModelConfig>,
    selected: usize,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self {
            models: default_models(),
            selected: 0,
        }
    }
}

impl ModelRegistry {
    /// Rebuild a registry from its persisted parts.
    ///
    /// The selection is matched by full equality first, then by name; an
    /// unknown selection falls back to the first entry and an empty list to
    /// the default registry.
    pub fn from_parts(models: Vec<ModelConfig>, selected: Option<&ModelConfig>) -> Self {
        if models.is_empty() {
            return Self::default();
        }
        let selected = selected
            .and_then(|sel| {
                models
                    .iter()
                    .position(|m| m == sel)
                    .or_else(|| models.iter().position(|m| m.name == sel.name))
            })
            .unwrap_or(0);
        Self { models, selected }
    }

    pub fn models(&self) -> &[ModelConfig] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn selected(&self) -> &ModelConfig {
        &self.models[self.selected]
    }

    /// Append a model and select it.
    pub fn add(&mut self, model: ModelConfig) -> &ModelConfig {
        info!("Adding model '{}' at {}", model.name, model.api_url);
        self.models.push(model);
        self.selected = self.models.len() - 1;
        &self.models[self.selected]
    }

    /// Remove every entry named `name`.
    ///
    /// If the selected entry goes, the first remaining entry is selected.
    /// Refused when only one entry is left or when nothing would remain.
    pub fn remove(&mut self, name: &str) -> Result<(), MacroInsightError> {
        if self.models.len() <= 1 {
            return Err(MacroInsightError::Registry(
                "At least one model must remain configured".to_string(),
            ));
        }
        let matches = self.models.iter().filter(|m| m.name == name).count();
        if matches == 0 {
            return Err(MacroInsightError::Registry(format!("Unknown model: {}", name)));
        }
        if matches == self.models.len() {
            return Err(MacroInsightError::Registry(
                "At least one model must remain configured".to_string(),
            ));
        }

        let selected_removed = self.models[self.selected].name == name;
        let removed_before = self.models[..self.selected]
            .iter()
            .filter(|m| m.name == name)
            .count();

        self.models.retain(|m| m.name != name);
        self.selected = if selected_removed {
            0
        } else {
            self.selected - removed_before
        };

        info!(
            "Removed model '{}' ({} entr{}), selected is now '{}'",
            name,
            matches,
            if matches == 1 { "y" } else { "ies" },
            self.selected().name
        );
        Ok(())
    }

    /// Select the first entry named `name`.
    pub fn select(&mut self, name: &str) -> Result<&ModelConfig, MacroInsightError> {
        let idx = self
            .models
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| MacroInsightError::Registry(format!("Unknown model: {}", name)))?;
        self.selected = idx;
        Ok(&self.models[idx])
    }

    /// Overwrite the API key of the selected entry.
    pub fn set_selected_api_key(&mut self, key: &str) {
        self.models[self.selected].api_key = key.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str) -> ModelConfig {
        ModelConfig::new(name, format!("https://{}.example/v1/chat/completions", name), "")
    }

    fn registry(names: &[&str]) -> ModelRegistry {
        ModelRegistry::from_parts(names.iter().map(|n| model(n)).collect(), None)
    }

    #[test]
    fn test_add_selects_new_entry() {
        let mut reg = ModelRegistry::default();
        reg.add(model("gpt-4o"));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.selected().name, "gpt-4o");
    }

    #[test]
    fn test_add_allows_duplicate_names() {
        let mut reg = registry(&["a"]);
        reg.add(ModelConfig::new("a", "https://other.example/v1", ""));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.selected().api_url, "https://other.example/v1");
    }

    #[test]
    fn test_remove_selected_falls_back_to_first() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.select("c").unwrap();
        reg.remove("c").unwrap();
        assert_eq!(reg.selected().name, "a");

        reg.select("b").unwrap();
        reg.remove("b").unwrap();
        assert_eq!(reg.selected().name, "a");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_first_while_it_is_selected() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.remove("a").unwrap();
        assert_eq!(reg.selected().name, "b");
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let mut reg = registry(&["a", "b", "c"]);
        reg.select("c").unwrap();
        reg.remove("a").unwrap();
        assert_eq!(reg.selected().name, "c");
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_remove_only_entry_is_refused() {
        let mut reg = ModelRegistry::default();
        assert!(matches!(reg.remove("deepseek-chat"), Err(MacroInsightError::Registry(_))));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_every_entry_is_refused() {
        let mut reg = registry(&["dup", "dup"]);
        assert!(reg.remove("dup").is_err());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_remove_drops_all_duplicates() {
        let mut reg = registry(&["dup", "b", "dup"]);
        reg.select("b").unwrap();
        reg.remove("dup").unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.selected().name, "b");
    }

    #[test]
    fn test_remove_unknown_name() {
        let mut reg = registry(&["a", "b"]);
        assert!(reg.remove("zzz").is_err());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_select_unknown_name() {
        let mut reg = registry(&["a", "b"]);
        reg.select("b").unwrap();
        assert!(reg.select("zzz").is_err());
        assert_eq!(reg.selected().name, "b");
    }

    #[test]
    fn test_from_parts_matches_selection() {
        let models = vec![model("a"), model("b")];
        let mut sel = model("b");
        assert_eq!(ModelRegistry::from_parts(models.clone(), Some(&sel)).selected().name, "b");

        // stale copy of the selected entry still matches by name
        sel.api_key = "stale".into();
        assert_eq!(ModelRegistry::from_parts(models.clone(), Some(&sel)).selected().name, "b");

        let gone = model("gone");
        assert_eq!(ModelRegistry::from_parts(models, Some(&gone)).selected().name, "a");
    }

    #[test]
    fn test_set_selected_api_key() {
        let mut reg = registry(&["a", "b"]);
        reg.select("b").unwrap();
        reg.set_selected_api_key("sk-b");
        assert_eq!(reg.models()[1].api_key, "sk-b");
        assert_eq!(reg.models()[0].api_key, "");
    }
}
