//! Error types for the Extractor

use grievance_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// The `Display` output of each variant is exactly the message returned to
/// the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Grievance text missing or blank
    #[error("No text provided")]
    EmptyText,

    /// Model API answered with a non-200 status
    #[error("{body}")]
    Upstream {
        /// Status returned by the model API
        status: u16,
        /// Raw body returned by the model API
        body: String,
    },

    /// Model API answered 200 without `candidates`
    #[error("Unexpected response structure")]
    UnexpectedStructure,

    /// Any other failure
    #[error("{0}")]
    Internal(String),
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Upstream { status, body } => ExtractorError::Upstream { status, body },
            LlmError::UnexpectedStructure => ExtractorError::UnexpectedStructure,
            other => ExtractorError::Internal(other.to_string()),
        }
    }
}
