//! Two-step analysis: structured impact analysis, then a best-effort advice
//! summary built from it. The steps are separate calls; the caller publishes
//! the analysis before asking for advice.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::client::ChatTransport;
use super::extraction::parse_analysis;
use super::prompts::{build_advice_prompt, build_analysis_prompt};
use super::types::AnalysisResult;
use super::validation::{validate_analysis, ValidationWarning};
use crate::error::MacroInsightError;
use crate::settings::ModelConfig;

/// Everything one analysis run needs, captured from the session up front so
/// no lock is held while requests are in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    pub news_text: String,
    pub api_key: String,
    pub model: ModelConfig,
    pub detailed: bool,
}

/// Result of a successful run. `advice` stays `None` until
/// [`request_advice`] has answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub analysis: AnalysisResult,
    pub advice: Option<String>,
    pub warnings: Vec<ValidationWarning>,
}

/// Request and parse the structured analysis.
pub async fn analyze_news<T: ChatTransport + ?Sized>(
    transport: &T,
    ticket: &AnalysisTicket,
) -> Result<AnalysisResult, MacroInsightError> {
    let prompt = build_analysis_prompt(&ticket.news_text, ticket.detailed);
    info!(
        "Requesting {} analysis from {}",
        if ticket.detailed { "detailed" } else { "concise" },
        ticket.model.name
    );

    let completion = transport.complete(&ticket.model, &ticket.api_key, &prompt).await?;
    parse_analysis(&completion).map_err(|e| {
        warn!("Analysis response was not usable JSON: {}", e);
        MacroInsightError::JsonParse(e.to_string())
    })
}

/// Request the advice summary. Any failure yields `None`; the analysis
/// stands on its own.
pub async fn request_advice<T: ChatTransport + ?Sized>(
    transport: &T,
    ticket: &AnalysisTicket,
    analysis: &AnalysisResult,
) -> Option<String> {
    let prompt = build_advice_prompt(&ticket.news_text, analysis);
    match transport.complete(&ticket.model, &ticket.api_key, &prompt).await {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => {
            warn!("Advice response was empty");
            None
        }
        Err(e) => {
            warn!("Advice request failed: {}", e);
            None
        }
    }
}

/// Request, parse and validate the structured analysis. The advice summary
/// comes from a separate [`request_advice`] call.
pub async fn run_analysis<T: ChatTransport + ?Sized>(
    transport: &T,
    ticket: &AnalysisTicket,
) -> Result<AnalysisOutcome, MacroInsightError> {
    let analysis = analyze_news(transport, ticket).await?;

    let warnings = validate_analysis(&analysis);
    for w in &warnings {
        warn!("{}", w.message);
    }
    info!("Analysis ready ({} warnings)", warnings.len());

    Ok(AnalysisOutcome {
        analysis,
        advice: None,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays scripted responses and records the prompts it was sent.
    struct ScriptedTransport {
        responses: Mutex<Vec<Result<String, MacroInsightError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<String, MacroInsightError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn complete(
            &self,
            _endpoint: &ModelConfig,
            _api_key: &str,
            prompt: &str,
        ) -> Result<String, MacroInsightError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Err(MacroInsightError::Transport("no scripted response".into()));
            }
            responses.remove(0)
        }
    }

    fn ticket(detailed: bool) -> AnalysisTicket {
        AnalysisTicket {
            news_text: "The Fed raised rates by 50bp.".to_string(),
            api_key: "sk-test".to_string(),
            model: ModelConfig::new("deepseek-chat", "https://api.deepseek.com/v1/chat/completions", ""),
            detailed,
        }
    }

    const ANALYSIS: &str = r#"Here you go:
```json
{"summary": "Hawkish surprise", "duration": {"assessment": "medium-term"},
 "magnitude": {"overall": "high"},
 "direction": {"stocks": {"overall": "negative"}, "bonds": {"overall": "negative"},
   "commodities": {"overall": "neutral"}, "forex": {"overall": "USD up"},
   "crypto": {"overall": "negative"}}}
```"#;

    #[tokio::test]
    async fn test_analysis_then_advice() {
        let transport = ScriptedTransport::new(vec![
            Ok(ANALYSIS.to_string()),
            Ok("Reduce duration.".to_string()),
        ]);
        let t = ticket(true);
        let outcome = run_analysis(&transport, &t).await.unwrap();

        assert_eq!(outcome.analysis.summary, "Hawkish surprise");
        assert!(outcome.advice.is_none());
        assert!(outcome.warnings.is_empty());
        assert_eq!(transport.prompts().len(), 1);

        let advice = request_advice(&transport, &t, &outcome.analysis).await;
        assert_eq!(advice.as_deref(), Some("Reduce duration."));

        let prompts = transport.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("backed by data"));
        assert!(prompts[1].contains("Impact duration: medium-term"));
    }

    #[tokio::test]
    async fn test_concise_prompt() {
        let transport = ScriptedTransport::new(vec![Ok(ANALYSIS.to_string())]);
        run_analysis(&transport, &ticket(false)).await.unwrap();
        assert!(transport.prompts()[0].contains("brief, focused analysis"));
    }

    #[tokio::test]
    async fn test_advice_failure_is_none() {
        let transport = ScriptedTransport::new(vec![Err(MacroInsightError::HttpStatus {
            status: 429,
            body: "slow down".into(),
        })]);
        let analysis = AnalysisResult::default();
        assert!(request_advice(&transport, &ticket(true), &analysis).await.is_none());
    }

    #[tokio::test]
    async fn test_blank_advice_is_none() {
        let transport = ScriptedTransport::new(vec![Ok("  \n".into())]);
        let analysis = AnalysisResult::default();
        assert!(request_advice(&transport, &ticket(true), &analysis).await.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_analysis_is_json_error() {
        let transport = ScriptedTransport::new(vec![Ok("Sorry, I cannot help with that.".to_string())]);
        let err = run_analysis(&transport, &ticket(true)).await.unwrap_err();
        assert!(matches!(err, MacroInsightError::JsonParse(_)));
        assert_eq!(transport.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let transport = ScriptedTransport::new(vec![Err(MacroInsightError::HttpStatus {
            status: 401,
            body: "bad key".into(),
        })]);
        let err = run_analysis(&transport, &ticket(true)).await.unwrap_err();
        assert_eq!(err.to_string(), "API request failed with status: 401");
    }

    #[tokio::test]
    async fn test_partial_analysis_yields_warnings() {
        let transport = ScriptedTransport::new(vec![
            Ok(r#"{"summary": "Only a summary"}"#.to_string()),
        ]);
        let outcome = run_analysis(&transport, &ticket(true)).await.unwrap();
        assert_eq!(outcome.warnings.len(), 7);
        assert_eq!(transport.prompts().len(), 1);
    }
}
