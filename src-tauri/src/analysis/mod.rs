//! News analysis: prompt construction, model calls, response extraction and
//! validation.

pub mod client;
pub mod extraction;
pub mod pipeline;
pub mod prompts;
pub mod types;
pub mod validation;

pub use client::{ChatTransport, HttpChatClient};
pub use pipeline::{request_advice, run_analysis, AnalysisOutcome, AnalysisTicket};
pub use types::AnalysisResult;
pub use validation::ValidationWarning;
