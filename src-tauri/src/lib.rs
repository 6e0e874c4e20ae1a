pub mod analysis;
mod commands;
pub mod error;
pub mod report;
pub mod session;
pub mod settings;

pub use error::MacroInsightError;
pub use session::{AppState, SessionSnapshot};

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::settings::get_settings,
            commands::settings::set_api_key,
            commands::settings::select_model,
            commands::settings::add_model,
            commands::settings::remove_model,
            commands::settings::set_display_options,
            commands::analysis::analyze_news,
            commands::analysis::get_session,
            commands::report::generate_report,
            commands::report::export_report,
        ])
        .setup(|app| {
            use tauri::Manager;
            let settings = settings::store::load_settings(app.handle());
            tracing::info!(
                "Loaded settings: {} model(s), selected '{}'",
                settings.models.len(),
                settings.models.selected().name
            );
            app.manage(AppState::new(settings));
            app.manage(analysis::HttpChatClient::new()?);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
