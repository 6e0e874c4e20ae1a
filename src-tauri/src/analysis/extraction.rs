//! Locate and parse the JSON object inside free-form model output.
//!
//! Models wrap their JSON in prose, Markdown fences, or apologies. The
//! candidate is the span from the first `{` to the last `}`; when no such
//! ordered pair exists the whole completion is tried instead. Nothing is
//! repaired and nothing is retried.

use serde_json::Value;
use thiserror::Error;

use super::types::AnalysisResult;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Return the slice most likely to hold the JSON object.
pub fn json_candidate(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Extract a JSON value from model output.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    Ok(serde_json::from_str(json_candidate(text))?)
}

/// Extract the analysis object from model output.
///
/// The top level must be a JSON object; its contents are deserialized
/// leniently (see [`AnalysisResult`]).
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, ExtractError> {
    let value = extract_json(text)?;
    if !value.is_object() {
        return Err(ExtractError::NotAnObject(json_kind(&value)));
    }
    Ok(serde_json::from_value(value)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
