//! Gemini Provider Implementation
//!
//! Talks to Google's generative-language `generateContent` endpoint.
//!
//! # Behavior
//!
//! - One POST per prompt; no retries, no backoff
//! - Timeouts are the `reqwest` client defaults
//! - API key travels as the `key` query parameter
//! - Only HTTP 200 is treated as success; any other status is surfaced
//!   with its raw body
//!
//! # Examples
//!
//! ```no_run
//! use grievance_llm::GeminiProvider;
//!
//! let provider = GeminiProvider::default_endpoint("gemini-1.5-flash-latest", "my-api-key");
//! ```

use crate::LlmError;
use grievance_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Default generative-language API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for extraction
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Gemini API provider
pub struct GeminiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the generateContent API
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<ReplyPart>>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: API root (e.g., "https://generativelanguage.googleapis.com")
    /// - `model`: Model id (e.g., "gemini-1.5-flash-latest")
    /// - `api_key`: Pre-shared API key
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider against the public Google endpoint
    pub fn default_endpoint(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, model, api_key)
    }

    /// Full generateContent URL, without the key
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send `prompt` to the model and return the first candidate's text
    ///
    /// # Errors
    ///
    /// - `Upstream` for any status other than 200
    /// - `UnexpectedStructure` when a 200 body has no `candidates`
    /// - `InvalidResponse` when the body is not JSON or the first candidate
    ///   has no text part
    /// - `Communication` when the request cannot be sent or the body read
    pub async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.endpoint_url();
        debug!("Calling {} with prompt of {} chars", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .await
            // The URL carries the API key; keep it out of error messages
            .map_err(|e| LlmError::Communication(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(e.without_url().to_string()))?;

        if status != reqwest::StatusCode::OK {
            warn!("Gemini returned HTTP {}", status.as_u16());
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        info!("Gemini model output: {}", body);

        parse_generate_content(&body)
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a 200 body
///
/// Only the absence of a `candidates` key is an unexpected structure; a
/// `candidates` value of the wrong shape is an invalid response.
fn parse_generate_content(body: &str) -> Result<String, LlmError> {
    let reply: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let candidates = match reply {
        serde_json::Value::Object(mut fields) => match fields.remove("candidates") {
            Some(candidates) => candidates,
            None => return Err(LlmError::UnexpectedStructure),
        },
        _ => return Err(LlmError::UnexpectedStructure),
    };

    let candidates: Vec<Candidate> = serde_json::from_value(candidates)
        .map_err(|e| LlmError::InvalidResponse(format!("Malformed candidates: {}", e)))?;

    candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| {
            LlmError::InvalidResponse("candidates[0].content.parts[0].text is missing".to_string())
        })
}

impl fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.generate_content(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_provider_creation() {
        let provider = GeminiProvider::new("http://localhost:8080", "gemini-test", "k");
        assert_eq!(provider.base_url, "http://localhost:8080");
        assert_eq!(provider.model, "gemini-test");
        assert_eq!(provider.model_name(), "gemini-test");
    }

    #[test]
    fn test_default_endpoint() {
        let provider = GeminiProvider::default_endpoint(DEFAULT_MODEL, "k");
        assert_eq!(
            provider.endpoint_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let provider = GeminiProvider::new("http://localhost:8080/", "m", "k");
        assert_eq!(
            provider.endpoint_url(),
            "http://localhost:8080/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = GeminiProvider::new("http://localhost", "m", "super-secret");
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::new("hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_parse_first_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}], "role": "model"}},
                {"content": {"parts": [{"text": "other"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10}
        }"#;
        assert_eq!(parse_generate_content(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_text_is_verbatim() {
        let text = "```json\n{\"Category\": \"Water\"}\n```";
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })
        .to_string();
        assert_eq!(parse_generate_content(&body).unwrap(), text);
    }

    #[test]
    fn test_parse_missing_candidates() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert_eq!(
            parse_generate_content(body).unwrap_err(),
            LlmError::UnexpectedStructure
        );
    }

    #[test]
    fn test_parse_empty_candidates() {
        let result = parse_generate_content(r#"{"candidates": []}"#);
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_candidate_without_content() {
        let result = parse_generate_content(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_null_candidates() {
        match parse_generate_content(r#"{"candidates": null}"#) {
            Err(LlmError::InvalidResponse(msg)) => assert!(msg.starts_with("Malformed candidates")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_candidates() {
        for body in [
            r#"{"candidates": [{"content": "oops"}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": 5}]}}]}"#,
            r#"{"candidates": {}}"#,
        ] {
            let result = parse_generate_content(body);
            assert!(
                matches!(result, Err(LlmError::InvalidResponse(_))),
                "body {} gave {:?}",
                body,
                result
            );
        }
    }

    #[test]
    fn test_parse_non_object_reply() {
        assert_eq!(
            parse_generate_content("[1, 2]").unwrap_err(),
            LlmError::UnexpectedStructure
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_generate_content("not json at all");
        match result {
            Err(LlmError::InvalidResponse(msg)) => assert!(msg.starts_with("Failed to parse response")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gemini_error_handling() {
        // Nothing listens on port 1
        let provider = GeminiProvider::new("http://127.0.0.1:1", "m", "secret-key");

        let result = provider.generate_content("test").await;

        match result {
            Err(LlmError::Communication(msg)) => assert!(!msg.contains("secret-key")),
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }
}
