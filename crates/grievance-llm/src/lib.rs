//! Grievance LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `grievance-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google generative-language `generateContent` API
//!
//! # Examples
//!
//! ```
//! use grievance_llm::MockProvider;
//! use grievance_domain::LlmProvider;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! assert_eq!(provider.call_count(), 1);
//! # });
//! ```

#![warn(missing_docs)]

pub mod gemini;

use grievance_domain::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The API answered with a non-200 status
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream {
        /// HTTP status code returned by the API
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A 200 reply without the expected `candidates` list
    #[error("Unexpected response structure")]
    UnexpectedStructure,

    /// Reply could not be parsed or lacks required pieces
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Every prompt it receives is recorded so tests can assert on what was sent.
///
/// # Examples
///
/// ```
/// use grievance_llm::{LlmError, MockProvider};
/// use grievance_domain::LlmProvider;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("prompt1").await.unwrap(), "response1");
///
/// provider.fail_with(LlmError::UnexpectedStructure);
/// assert!(provider.generate("prompt1").await.is_err());
/// assert_eq!(provider.prompts(), vec!["prompt1", "prompt1"]);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    failure: Arc<Mutex<Option<LlmError>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            failure: Arc::new(Mutex::new(None)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every call with `error`
    pub fn failing(error: LlmError) -> Self {
        let provider = Self::default();
        provider.fail_with(error);
        provider
    }

    /// Override the reported model name
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), response.into());
    }

    /// Make every subsequent call fail with `error`
    pub fn fail_with(&self, error: LlmError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Stop failing calls
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reset the call count and recorded prompts
    pub fn reset_call_count(&self) {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// All prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        if let Some(error) = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(responses
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.respond(prompt)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
