//! Core Extractor implementation

use crate::error::ExtractorError;
use crate::parser::parse_grievance_record;
use crate::prompt::PromptBuilder;
use crate::types::StructuredExtraction;
use grievance_domain::LlmProvider;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The Extractor turns grievance text into the model's field listing
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    ExtractorError: From<L::Error>,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
        }
    }

    /// Model identifier reported by the provider
    pub fn model_name(&self) -> &str {
        self.llm_provider.model_name()
    }

    /// Extract grievance fields from `text`
    ///
    /// Blank text is rejected before the model is called. Otherwise exactly
    /// one model call is made and its text is returned unmodified.
    pub async fn extract(&self, text: &str) -> Result<String, ExtractorError> {
        if text.trim().is_empty() {
            debug!("Rejecting blank grievance text");
            return Err(ExtractorError::EmptyText);
        }

        info!("Starting extraction, text length {}", text.len());

        let prompt = PromptBuilder::new(text).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self.llm_provider.generate(&prompt).await.map_err(|e| {
            let error = ExtractorError::from(e);
            warn!("Extraction failed: {}", error);
            error
        })?;

        info!("Extraction complete, response length {}", response.len());

        Ok(response)
    }

    /// Extract and additionally parse the reply into grievance fields
    ///
    /// Parsing never fails the call; an unusable reply yields `fields: None`.
    pub async fn extract_structured(
        &self,
        text: &str,
    ) -> Result<StructuredExtraction, ExtractorError> {
        let response = self.extract(text).await?;
        let fields = parse_grievance_record(&response);

        Ok(StructuredExtraction { response, fields })
    }
}
