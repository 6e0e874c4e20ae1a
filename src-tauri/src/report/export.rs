use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// `macro_news_analysis_<UTC timestamp>.md`, e.g.
/// `macro_news_analysis_2024-03-20T140509123Z.md`.
pub fn report_filename(now: DateTime<Utc>) -> String {
    format!("macro_news_analysis_{}.md", now.format("%Y-%m-%dT%H%M%S%3fZ"))
}

/// The user's download directory, falling back to the home directory.
pub fn default_export_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(dirs::home_dir)
}

/// Write a report into `dir` atomically and return the final path.
///
/// The content goes to a temp file in the same directory which is then
/// renamed over the target, so a failed write never leaves a partial report.
pub fn write_report_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let target = dir.join(filename);

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(&target)?;

    info!("Exported report to {:?}", target);
    Ok(target)
}
