//! Tauri commands for running an analysis and reading the session back.

use tauri::{AppHandle, Manager, State};
use tracing::error;

use crate::analysis::{AnalysisOutcome, HttpChatClient};
use crate::session::{AppState, SessionSnapshot};

/// Analyse a news item with the selected model.
///
/// Returns the structured analysis and any validation warnings as soon as
/// the analysis parses. The advice summary is requested in the background
/// and lands in the session; poll `get_session` for it.
#[tauri::command]
pub async fn analyze_news(
    app: AppHandle,
    state: State<'_, AppState>,
    client: State<'_, HttpChatClient>,
    news_text: String,
) -> Result<AnalysisOutcome, String> {
    let outcome = state.analyze(client.inner(), &news_text).await?;

    tauri::async_runtime::spawn(async move {
        let state = app.state::<AppState>();
        let client = app.state::<HttpChatClient>();
        if let Err(e) = state.advise(client.inner()).await {
            error!("Failed to record advice: {}", e);
        }
    });

    Ok(outcome)
}

#[tauri::command]
pub fn get_session(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    Ok(state.with(|session| session.snapshot())?)
}
