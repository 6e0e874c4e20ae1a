//! Chat-completion transport.
//!
//! Every configured model speaks the OpenAI-compatible chat completions
//! protocol: one user message in, `choices[0].message.content` out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::MacroInsightError;
use crate::settings::ModelConfig;

/// Longest slice of an error body kept in logs.
const ERROR_BODY_LOG_LIMIT: usize = 1024;

/// Sends one prompt to a model endpoint and returns the raw completion text.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(
        &self,
        endpoint: &ModelConfig,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, MacroInsightError>;
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    pub fn user(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a completion response body.
pub fn parse_completion_body(body: &str) -> Result<String, MacroInsightError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        MacroInsightError::UnexpectedResponse(format!("response is not valid JSON: {}", e))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            MacroInsightError::UnexpectedResponse("no content in choices[0].message".to_string())
        })
}

fn truncate_for_log(body: &str) -> String {
    if body.len() <= ERROR_BODY_LOG_LIMIT {
        return body.to_string();
    }
    let mut end = ERROR_BODY_LOG_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// `reqwest` implementation of [`ChatTransport`].
///
/// No request timeout is configured; a hung endpoint keeps the analysis in
/// flight until the connection drops.
pub struct HttpChatClient {
    client: reqwest::Client,
}

impl HttpChatClient {
    pub fn new() -> Result<Self, MacroInsightError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| MacroInsightError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn complete(
        &self,
        endpoint: &ModelConfig,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, MacroInsightError> {
        debug!(
            "POST {} (model {}, prompt {} chars)",
            endpoint.api_url,
            endpoint.name,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&endpoint.api_url)
            .bearer_auth(api_key)
            .json(&ChatRequest::user(&endpoint.name, prompt))
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", endpoint.api_url, e);
                MacroInsightError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MacroInsightError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!(
                "Model endpoint {} returned {}: {}",
                endpoint.api_url,
                status,
                truncate_for_log(&body)
            );
            return Err(MacroInsightError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ChatRequest::user("deepseek-chat", "hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "deepseek-chat",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn test_parse_completion_body() {
        let body = r#"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"summary\": \"ok\"}"}}]}"#;
        assert_eq!(parse_completion_body(body).unwrap(), r#"{"summary": "ok"}"#);
    }

    #[test]
    fn test_parse_completion_body_without_content() {
        for body in [
            r#"{"choices": []}"#,
            r#"{}"#,
            r#"{"choices": [{"message": {"role": "assistant"}}]}"#,
            r#"{"choices": [{"finish_reason": "length"}]}"#,
        ] {
            assert!(
                matches!(parse_completion_body(body), Err(MacroInsightError::UnexpectedResponse(_))),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_parse_completion_body_not_json() {
        assert!(matches!(
            parse_completion_body("<html>Bad gateway</html>"),
            Err(MacroInsightError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let body = "é".repeat(600);
        let out = truncate_for_log(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= ERROR_BODY_LOG_LIMIT + 3);
        assert_eq!(truncate_for_log("short"), "short");
    }
}
