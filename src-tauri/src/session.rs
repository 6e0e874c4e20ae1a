//! Session state owned by the Tauri app.
//!
//! One [`Session`] per app instance sits behind a mutex in [`AppState`]. The
//! lock is only taken for short synchronous updates; the analysis requests
//! run with it released.
//!
//! A run has two phases. The analysis is committed as soon as it parses, and
//! the run stays in flight until the advice request has answered.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::analysis::{request_advice, run_analysis, AnalysisOutcome, AnalysisResult, AnalysisTicket, ChatTransport, ValidationWarning};
use crate::error::MacroInsightError;
use crate::report::generate_report;
use crate::settings::Settings;

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub settings: Settings,
    pub news_text: String,
    pub analysis: Option<AnalysisResult>,
    pub advice: Option<String>,
    pub warnings: Vec<ValidationWarning>,
    pub is_analyzing: bool,
    pub error: Option<String>,
    /// Set between the committed analysis and the advice answer
    advice_ticket: Option<AnalysisTicket>,
}

/// What the frontend needs to redraw the analyzer page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub news_text: String,
    pub analysis: Option<AnalysisResult>,
    pub advice: Option<String>,
    pub warnings: Vec<ValidationWarning>,
    pub is_analyzing: bool,
    pub advice_pending: bool,
    pub error: Option<String>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Check preconditions and reset the session for a new request.
    ///
    /// Checks run in order: credential, news text, in-flight flag. A refused
    /// request leaves the previous result untouched.
    pub fn begin_analysis(&mut self, news_text: &str) -> Result<AnalysisTicket, MacroInsightError> {
        let refusal = if self.settings.api_key.trim().is_empty() {
            Some(MacroInsightError::MissingApiKey)
        } else if news_text.trim().is_empty() {
            Some(MacroInsightError::MissingNewsText)
        } else if self.is_analyzing {
            Some(MacroInsightError::AnalysisInFlight)
        } else {
            None
        };
        if let Some(err) = refusal {
            warn!("Analysis refused: {}", err);
            if !matches!(err, MacroInsightError::AnalysisInFlight) {
                self.error = Some(err.to_string());
            }
            return Err(err);
        }

        self.news_text = news_text.to_string();
        self.analysis = None;
        self.advice = None;
        self.warnings.clear();
        self.error = None;
        self.advice_ticket = None;
        self.is_analyzing = true;

        Ok(AnalysisTicket {
            news_text: news_text.to_string(),
            api_key: self.settings.api_key.clone(),
            model: self.settings.models.selected().clone(),
            detailed: self.settings.detailed_analysis,
        })
    }

    /// Publish the parsed analysis. The run stays in flight until
    /// [`Session::complete_advice`].
    pub fn commit_analysis(&mut self, outcome: &AnalysisOutcome, ticket: AnalysisTicket) {
        self.analysis = Some(outcome.analysis.clone());
        self.advice = None;
        self.warnings = outcome.warnings.clone();
        self.advice_ticket = Some(ticket);
    }

    pub fn advice_pending(&self) -> bool {
        self.advice_ticket.is_some()
    }

    /// What the advice request needs, if one is due.
    pub fn advice_request(&self) -> Option<(AnalysisTicket, AnalysisResult)> {
        let ticket = self.advice_ticket.clone()?;
        let analysis = self.analysis.clone()?;
        Some((ticket, analysis))
    }

    pub fn complete_advice(&mut self, advice: Option<String>) {
        self.advice = advice;
        self.advice_ticket = None;
        self.is_analyzing = false;
    }

    pub fn fail_analysis(&mut self, err: &MacroInsightError) {
        self.error = Some(err.to_string());
        self.advice_ticket = None;
        self.is_analyzing = false;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            news_text: self.news_text.clone(),
            analysis: self.analysis.clone(),
            advice: self.advice.clone(),
            warnings: self.warnings.clone(),
            is_analyzing: self.is_analyzing,
            advice_pending: self.advice_pending(),
            error: self.error.clone(),
        }
    }

    /// Render the report for the current result.
    pub fn report(&self, generated_at: NaiveDateTime) -> Result<String, MacroInsightError> {
        let analysis = self.analysis.as_ref().ok_or(MacroInsightError::NoAnalysis)?;
        Ok(generate_report(
            &self.news_text,
            analysis,
            self.advice.as_deref(),
            generated_at,
        ))
    }
}

/// Managed Tauri state.
pub struct AppState {
    session: Mutex<Session>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: Mutex::new(Session::new(settings)),
        }
    }

    /// Run `f` with the session locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R, MacroInsightError> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| MacroInsightError::StatePoisoned)?;
        Ok(f(&mut session))
    }

    /// Analyse `news_text` with the current settings and commit the result.
    /// Follow up with [`AppState::advise`] to finish the run.
    pub async fn analyze<T: ChatTransport + ?Sized>(
        &self,
        transport: &T,
        news_text: &str,
    ) -> Result<AnalysisOutcome, MacroInsightError> {
        let ticket = self.with(|s| s.begin_analysis(news_text))??;
        info!("Analyzing {} chars of news", ticket.news_text.chars().count());

        let result = run_analysis(transport, &ticket).await;
        self.with(|s| match &result {
            Ok(outcome) => s.commit_analysis(outcome, ticket),
            Err(e) => s.fail_analysis(e),
        })?;
        result
    }

    /// Request the advice for the committed analysis and end the run.
    pub async fn advise<T: ChatTransport + ?Sized>(
        &self,
        transport: &T,
    ) -> Result<Option<String>, MacroInsightError> {
        let Some((ticket, analysis)) = self.with(|s| s.advice_request())? else {
            debug!("No advice request pending");
            return Ok(None);
        };

        let advice = request_advice(transport, &ticket, &analysis).await;
        info!("Advice {}", if advice.is_some() { "received" } else { "unavailable" });
        self.with(|s| s.complete_advice(advice.clone()))?;
        Ok(advice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed() -> Session {
        let mut settings = Settings::default();
        settings.set_api_key("sk-test");
        Session::new(settings)
    }

    #[test]
    fn test_missing_key_checked_first() {
        let mut s = Session::default();
        let err = s.begin_analysis("").unwrap_err();
        assert!(matches!(err, MacroInsightError::MissingApiKey));
        assert_eq!(s.error.as_deref(), Some("Please enter a valid API key in Settings"));
        assert!(!s.is_analyzing);
    }

    #[test]
    fn test_blank_news_refused() {
        let mut s = keyed();
        assert!(matches!(s.begin_analysis(" \n\t"), Err(MacroInsightError::MissingNewsText)));
    }

    #[test]
    fn test_in_flight_refused_without_touching_state() {
        let mut s = keyed();
        s.begin_analysis("first").unwrap();
        assert!(matches!(s.begin_analysis("second"), Err(MacroInsightError::AnalysisInFlight)));
        assert_eq!(s.news_text, "first");
        assert!(s.error.is_none());
        assert!(s.is_analyzing);
    }

    #[test]
    fn test_begin_resets_previous_result() {
        let mut s = keyed();
        s.analysis = Some(AnalysisResult::default());
        s.advice = Some("old".into());
        s.error = Some("old error".into());

        let ticket = s.begin_analysis("news").unwrap();
        assert!(s.analysis.is_none() && s.advice.is_none() && s.error.is_none());
        assert_eq!(ticket.api_key, "sk-test");
        assert_eq!(ticket.model.name, "deepseek-chat");
        assert!(ticket.detailed);
    }

    #[test]
    fn test_fail_clears_in_flight_flag() {
        let mut s = keyed();
        s.begin_analysis("news").unwrap();
        s.fail_analysis(&MacroInsightError::HttpStatus { status: 500, body: String::new() });
        assert!(!s.is_analyzing);
        assert_eq!(s.error.as_deref(), Some("API request failed with status: 500"));
        assert!(s.analysis.is_none());
    }

    #[test]
    fn test_commit_publishes_analysis_before_advice() {
        let mut s = keyed();
        let ticket = s.begin_analysis("news").unwrap();
        let outcome = AnalysisOutcome {
            analysis: AnalysisResult::default(),
            advice: None,
            warnings: Vec::new(),
        };
        s.commit_analysis(&outcome, ticket.clone());

        let snapshot = s.snapshot();
        assert!(snapshot.analysis.is_some());
        assert!(snapshot.advice_pending);
        assert!(snapshot.is_analyzing);
        assert_eq!(s.advice_request().map(|(t, _)| t), Some(ticket));

        s.complete_advice(Some("hold".into()));
        let snapshot = s.snapshot();
        assert_eq!(snapshot.advice.as_deref(), Some("hold"));
        assert!(!snapshot.advice_pending);
        assert!(!snapshot.is_analyzing);
        assert!(s.advice_request().is_none());
    }

    #[test]
    fn test_report_requires_analysis() {
        let s = keyed();
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(s.report(at), Err(MacroInsightError::NoAnalysis)));
    }
}
