use tauri::{AppHandle, State};
use tracing::info;

use crate::error::MacroInsightError;
use crate::session::AppState;
use crate::settings::store::save_settings;
use crate::settings::{ModelConfig, Settings};

/// Apply `f` to the in-memory settings, persist them, and return the result.
fn update_settings(
    app: &AppHandle,
    state: &AppState,
    f: impl FnOnce(&mut Settings) -> Result<(), MacroInsightError>,
) -> Result<Settings, String> {
    let updated = state.with(|session| {
        f(&mut session.settings)?;
        Ok::<_, MacroInsightError>(session.settings.clone())
    })??;
    save_settings(app, &updated)?;
    Ok(updated)
}

/// Accept only absolute http(s) URLs for model endpoints.
pub fn validate_model_input(name: &str, api_url: &str) -> Result<(), MacroInsightError> {
    if name.trim().is_empty() {
        return Err(MacroInsightError::InvalidModel("model name is required".to_string()));
    }
    let parsed = url::Url::parse(api_url.trim())
        .map_err(|e| MacroInsightError::InvalidModel(format!("invalid API URL '{}': {}", api_url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(MacroInsightError::InvalidModel(format!(
            "API URL must use http or https, got '{}'",
            other
        ))),
    }
}

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> Result<Settings, String> {
    Ok(state.with(|session| session.settings.clone())?)
}

#[tauri::command]
pub fn set_api_key(app: AppHandle, state: State<'_, AppState>, key: String) -> Result<Settings, String> {
    info!("Updating API key");
    update_settings(&app, &state, |settings| {
        settings.set_api_key(key.trim());
        Ok(())
    })
}

#[tauri::command]
pub fn select_model(app: AppHandle, state: State<'_, AppState>, name: String) -> Result<Settings, String> {
    info!("Selecting model: {}", name);
    update_settings(&app, &state, |settings| settings.select_model(&name))
}

#[tauri::command]
pub fn add_model(
    app: AppHandle,
    state: State<'_, AppState>,
    name: String,
    api_url: String,
    api_key: String,
) -> Result<Settings, String> {
    validate_model_input(&name, &api_url)?;
    update_settings(&app, &state, |settings| {
        settings.add_model(ModelConfig::new(name.trim(), api_url.trim(), api_key.trim()));
        Ok(())
    })
}

#[tauri::command]
pub fn remove_model(app: AppHandle, state: State<'_, AppState>, name: String) -> Result<Settings, String> {
    update_settings(&app, &state, |settings| settings.remove_model(&name))
}

#[tauri::command]
pub fn set_display_options(
    app: AppHandle,
    state: State<'_, AppState>,
    detailed_analysis: bool,
    include_charts: bool,
) -> Result<Settings, String> {
    info!(
        "Display options: detailed_analysis={}, include_charts={}",
        detailed_analysis, include_charts
    );
    update_settings(&app, &state, |settings| {
        settings.set_display_options(detailed_analysis, include_charts);
        Ok(())
    })
}
