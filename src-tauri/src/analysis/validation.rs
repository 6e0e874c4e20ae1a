use serde::{Deserialize, Serialize};

use super::types::AnalysisResult;

/// A field the model left empty. Reported to the user, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Dotted path of the field, e.g. `direction.stocks.overall`
    pub field: String,
    /// Human-readable warning message
    pub message: String,
}

/// Check the scalar fields the results view and the advice prompt rely on.
///
/// Missing values render as blanks; this only makes that visible. List
/// fields are not checked because an empty list is a legitimate answer.
pub fn validate_analysis(analysis: &AnalysisResult) -> Vec<ValidationWarning> {
    let direction = &analysis.direction;
    let required: [(&str, &str); 8] = [
        ("summary", analysis.summary.as_str()),
        ("duration.assessment", analysis.duration.assessment.as_str()),
        ("magnitude.overall", analysis.magnitude.overall.as_str()),
        ("direction.stocks.overall", direction.stocks.overall.as_str()),
        ("direction.bonds.overall", direction.bonds.overall.as_str()),
        ("direction.commodities.overall", direction.commodities.overall.as_str()),
        ("direction.forex.overall", direction.forex.overall.as_str()),
        ("direction.crypto.overall", direction.crypto.overall.as_str()),
    ];

    required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| ValidationWarning {
            field: (*field).to_string(),
            message: format!("Model response is missing '{}'", field),
        })
        .collect()
}
