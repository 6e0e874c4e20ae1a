use std::path::PathBuf;

use chrono::{Local, Utc};
use serde::Serialize;
use tauri::State;
use tracing::{info, warn};

use crate::error::MacroInsightError;
use crate::report::{default_export_dir, report_filename, write_report_atomic};
use crate::session::AppState;

#[derive(Debug, Serialize)]
pub struct ExportResult {
    /// Full path of the written file
    pub path: String,
    pub filename: String,
}

/// Markdown report for the current session.
#[tauri::command]
pub fn generate_report(state: State<'_, AppState>) -> Result<String, String> {
    let generated_at = Local::now().naive_local();
    Ok(state.with(|session| session.report(generated_at))??)
}

/// Write the current report to `directory`, or to the download directory.
#[tauri::command]
pub async fn export_report(
    state: State<'_, AppState>,
    directory: Option<String>,
) -> Result<ExportResult, String> {
    let content = state.with(|session| session.report(Local::now().naive_local()))??;

    let dir = match directory.filter(|d| !d.trim().is_empty()) {
        Some(d) => PathBuf::from(d),
        None => default_export_dir().ok_or_else(|| {
            MacroInsightError::Export("no download or home directory available".to_string())
        })?,
    };
    let filename = report_filename(Utc::now());
    info!("Exporting report to {:?}", dir.join(&filename));

    let name = filename.clone();
    let path = tokio::task::spawn_blocking(move || write_report_atomic(&dir, &name, &content))
        .await
        .map_err(|e| MacroInsightError::Export(format!("export task failed: {}", e)))?
        .map_err(|e| {
            warn!("Report export failed: {:#}", e);
            MacroInsightError::Export(format!("{:#}", e))
        })?;

    Ok(ExportResult {
        path: path.to_string_lossy().into_owned(),
        filename,
    })
}
