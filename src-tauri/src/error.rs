use thiserror::Error;

#[derive(Debug, Error)]
pub enum MacroInsightError {
    #[error("Please enter a valid API key in Settings")]
    MissingApiKey,

    #[error("Please enter the news content to analyze")]
    MissingNewsText,

    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("Request to model endpoint failed: {0}")]
    Transport(String),

    #[error("API request failed with status: {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Unexpected response from model endpoint: {0}")]
    UnexpectedResponse(String),

    #[error("Could not parse the JSON returned by the API: {0}")]
    JsonParse(String),

    #[error("There is no analysis result to report yet")]
    NoAnalysis,

    #[error("Model registry error: {0}")]
    Registry(String),

    #[error("Invalid model configuration: {0}")]
    InvalidModel(String),

    #[error("Settings store error: {0}")]
    Store(String),

    #[error("Report export failed: {0}")]
    Export(String),

    #[error("Session state is unavailable")]
    StatePoisoned,
}

impl From<MacroInsightError> for String {
    fn from(err: MacroInsightError) -> Self {
        err.to_string()
    }
}
