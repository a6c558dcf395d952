//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Trait for generative model operations
///
/// Implemented by the infrastructure layer (grievance-llm). The returned
/// future must be `Send` so providers can be driven from axum handlers.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a single text completion for the prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Identifier of the model backing this provider
    fn model_name(&self) -> &str;
}
