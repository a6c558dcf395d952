//! Request and result payloads for a single extraction

use serde::{Deserialize, Serialize};

/// A grievance submitted for field extraction
///
/// `text` is optional on the wire so that a missing or `null` value is
/// treated the same as an empty string instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrievanceRequest {
    /// Free-text grievance description
    #[serde(default)]
    pub text: Option<String>,
}

impl GrievanceRequest {
    /// Create a request from raw text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Return the grievance text if it is non-empty after trimming
    ///
    /// The returned slice is the text exactly as submitted; trimming is only
    /// used to decide whether anything was provided.
    ///
    /// # Examples
    ///
    /// ```
    /// use grievance_domain::GrievanceRequest;
    ///
    /// assert_eq!(GrievanceRequest::new("  pothole  ").grievance_text(), Some("  pothole  "));
    /// assert_eq!(GrievanceRequest::new(" \n\t").grievance_text(), None);
    /// assert_eq!(GrievanceRequest::default().grievance_text(), None);
    /// ```
    pub fn grievance_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Outcome of an extraction as it appears on the wire
///
/// Serialized untagged: exactly `{"response": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    /// Raw model text, relayed verbatim
    Response {
        /// Model-generated text
        response: String,
    },
    /// Failure message
    Error {
        /// Human-readable error
        error: String,
    },
}

impl ExtractionResult {
    /// Successful result carrying the model's text
    pub fn response(text: impl Into<String>) -> Self {
        ExtractionResult::Response {
            response: text.into(),
        }
    }

    /// Failed result carrying a message
    pub fn error(message: impl Into<String>) -> Self {
        ExtractionResult::Error {
            error: message.into(),
        }
    }
}
