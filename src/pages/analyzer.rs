//! News analysis page.
//!
//! Users paste a news item, run the analysis, and export the result as a
//! Markdown report.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, AnalyzeResponse, SessionSnapshot};
use crate::components::analysis_results::AnalysisResults;

/// Analysis state enum.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    /// Nothing analysed yet
    Idle,
    /// Requests in flight
    Analyzing,
    /// Analysis complete with results
    Complete(AnalyzeResponse),
    /// Error occurred
    Error(String),
}

impl AnalysisState {
    /// Rebuild the page state from a backend session snapshot. A committed
    /// analysis is shown even while its advice is still pending.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        if let Some(analysis) = snapshot.analysis {
            return AnalysisState::Complete(AnalyzeResponse {
                analysis,
                advice: snapshot.advice,
                warnings: snapshot.warnings,
            });
        }
        if snapshot.is_analyzing {
            return AnalysisState::Analyzing;
        }
        match snapshot.error {
            Some(err) => AnalysisState::Error(err),
            None => AnalysisState::Idle,
        }
    }
}

const SESSION_POLL_MS: i32 = 1000;

fn log_error(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

/// Re-read the session after a short delay, and keep doing so while a run is
/// in flight. Stops once the page's signals are gone.
fn poll_session(
    state: ReadSignal<AnalysisState>,
    set_state: WriteSignal<AnalysisState>,
    set_advice_pending: WriteSignal<bool>,
) {
    let callback = Closure::once(move || {
        spawn_local(async move {
            match commands::get_session().await {
                Ok(snapshot) => {
                    let in_flight = snapshot.is_analyzing;
                    let pending = snapshot.advice_pending;
                    let next = AnalysisState::from_snapshot(snapshot);
                    let Some(changed) = state.try_with_untracked(|current| *current != next) else {
                        return;
                    };
                    if changed {
                        set_state.set(next);
                    }
                    set_advice_pending.set(pending);
                    if in_flight {
                        poll_session(state, set_state, set_advice_pending);
                    }
                }
                Err(e) => log_error(&format!("Failed to refresh session: {}", e)),
            }
        });
    });

    let Some(window) = web_sys::window() else {
        return;
    };
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        SESSION_POLL_MS,
    ) {
        Ok(_) => callback.forget(),
        Err(_) => log_error("Failed to schedule a session refresh"),
    }
}

#[component]
pub fn AnalyzerPage() -> impl IntoView {
    let (news_text, set_news_text) = signal(String::new());
    let (state, set_state) = signal(AnalysisState::Idle);
    let (advice_pending, set_advice_pending) = signal(false);
    let (include_charts, set_include_charts) = signal(true);
    let (model_name, set_model_name) = signal(String::new());
    let (export_message, set_export_message) = signal::<Option<String>>(None);
    let (report_preview, set_report_preview) = signal::<Option<String>>(None);

    // Restore the last session and display settings on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::get_settings().await {
                Ok(settings) => {
                    set_include_charts.set(settings.include_charts);
                    set_model_name.set(settings.selected_name());
                }
                Err(e) => log_error(&format!("Failed to load settings: {}", e)),
            }
            match commands::get_session().await {
                Ok(snapshot) => {
                    let in_flight = snapshot.is_analyzing;
                    set_news_text.set(snapshot.news_text.clone());
                    set_advice_pending.set(snapshot.advice_pending);
                    set_state.set(AnalysisState::from_snapshot(snapshot));
                    if in_flight {
                        poll_session(state, set_state, set_advice_pending);
                    }
                }
                Err(e) => log_error(&format!("Failed to restore session: {}", e)),
            }
        });
    });

    let is_analyzing = move || matches!(state.get(), AnalysisState::Analyzing);
    let is_busy = move || is_analyzing() || advice_pending.get();

    let on_analyze = move |_| {
        if is_busy() {
            return;
        }
        let text = news_text.get();
        set_state.set(AnalysisState::Analyzing);
        set_export_message.set(None);
        set_report_preview.set(None);
        spawn_local(async move {
            match commands::analyze_news(&text).await {
                Ok(response) => {
                    set_state.set(AnalysisState::Complete(response));
                    set_advice_pending.set(true);
                    poll_session(state, set_state, set_advice_pending);
                }
                Err(e) => set_state.set(AnalysisState::Error(e)),
            }
        });
    };

    let on_export = move |_| {
        spawn_local(async move {
            match commands::export_report(None).await {
                Ok(result) => set_export_message.set(Some(format!("Report saved to {}", result.path))),
                Err(e) => set_export_message.set(Some(format!("Export failed: {}", e))),
            }
        });
    };

    let on_toggle_preview = move |_| {
        if report_preview.get().is_some() {
            set_report_preview.set(None);
            return;
        }
        spawn_local(async move {
            match commands::generate_report().await {
                Ok(report) => set_report_preview.set(Some(report)),
                Err(e) => set_export_message.set(Some(format!("Report failed: {}", e))),
            }
        });
    };

    view! {
        <div class="page analyzer-page">
            <h2>"Macro News Analysis"</h2>
            <p class="page-description">
                "Paste a macroeconomic or financial news item to assess its market impact."
                {move || {
                    let name = model_name.get();
                    (!name.is_empty()).then(|| format!(" Model: {}", name))
                }}
            </p>

            <div class="news-input">
                <textarea
                    class="input news-textarea"
                    rows="8"
                    placeholder="e.g. The Federal Reserve raised interest rates by 50 basis points..."
                    prop:value=move || news_text.get()
                    on:input=move |ev| set_news_text.set(event_target_value(&ev))
                    disabled=is_busy
                ></textarea>
                <div class="action-buttons">
                    <button class="btn btn-primary" on:click=on_analyze disabled=is_busy>
                        {move || if is_busy() { "Analyzing..." } else { "Analyze" }}
                    </button>
                </div>
            </div>

            {move || match state.get() {
                AnalysisState::Idle => view! {
                    <p class="empty-state">"Results will appear here."</p>
                }.into_any(),

                AnalysisState::Analyzing => view! {
                    <div class="loading-indicator">
                        <div class="spinner"></div>
                        <p>"Analyzing the news..."</p>
                        <p class="hint">"Two model calls are made: the analysis, then the advice summary."</p>
                    </div>
                }.into_any(),

                AnalysisState::Error(err) => view! {
                    <div class="error-box">
                        <strong>"Analysis failed: "</strong>
                        {err}
                    </div>
                }.into_any(),

                AnalysisState::Complete(response) => view! {
                    <div class="results-wrapper">
                        <div class="action-buttons">
                            <button class="btn btn-secondary" on:click=on_export>"Download Report"</button>
                            <button class="btn btn-secondary" on:click=on_toggle_preview>
                                {move || if report_preview.get().is_some() { "Hide Report" } else { "Preview Report" }}
                            </button>
                        </div>
                        {move || advice_pending.get().then(|| view! {
                            <p class="hint">"Waiting for the investment advice summary..."</p>
                        })}
                        {move || export_message.get().map(|msg| view! {
                            <p class="status-text">{msg}</p>
                        })}
                        {move || report_preview.get().map(|report| view! {
                            <pre class="report-preview">{report}</pre>
                        })}
                        <AnalysisResults
                            analysis=response.analysis
                            advice=response.advice
                            warnings=response.warnings
                            include_charts=include_charts.get_untracked()
                        />
                    </div>
                }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AnalysisResult;

    #[test]
    fn test_from_snapshot() {
        assert!(matches!(AnalysisState::from_snapshot(SessionSnapshot::default()), AnalysisState::Idle));

        let in_flight = SessionSnapshot { is_analyzing: true, ..Default::default() };
        assert!(matches!(AnalysisState::from_snapshot(in_flight), AnalysisState::Analyzing));

        let awaiting_advice = SessionSnapshot {
            analysis: Some(AnalysisResult::default()),
            is_analyzing: true,
            advice_pending: true,
            ..Default::default()
        };
        match AnalysisState::from_snapshot(awaiting_advice) {
            AnalysisState::Complete(r) => assert!(r.advice.is_none()),
            other => panic!("unexpected state: {:?}", other),
        }

        let failed = SessionSnapshot { error: Some("boom".into()), ..Default::default() };
        assert!(matches!(AnalysisState::from_snapshot(failed), AnalysisState::Error(e) if e == "boom"));

        let done = SessionSnapshot {
            analysis: Some(AnalysisResult::default()),
            advice: Some("hold".into()),
            ..Default::default()
        };
        match AnalysisState::from_snapshot(done) {
            AnalysisState::Complete(r) => assert_eq!(r.advice.as_deref(), Some("hold")),
            other => panic!("unexpected state: {:?}", other),
        }
    }
}
