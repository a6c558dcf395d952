//! HTTP contract tests for the Gemini provider against a mocked upstream

use grievance_domain::LlmProvider;
use grievance_llm::{GeminiProvider, LlmError};
use httpmock::prelude::*;
use serde_json::json;

const MODEL: &str = "gemini-test";
const API_KEY: &str = "test-api-key";
const PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(server.base_url(), MODEL, API_KEY)
}

#[tokio::test]
async fn test_generate_sends_expected_request() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(PATH)
                .query_param("key", API_KEY)
                .header("content-type", "application/json")
                .json_body(json!({
                    "contents": [{"parts": [{"text": "Extract this"}]}]
                }));
            then.status(200).json_body(json!({
                "candidates": [{"content": {"parts": [{"text": "X"}], "role": "model"}}]
            }));
        })
        .await;

    let provider = provider_for(&server);
    let result = provider.generate("Extract this").await;

    mock.assert_async().await;
    assert_eq!(result.unwrap(), "X");
}

#[tokio::test]
async fn test_missing_candidates_is_unexpected_structure() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(200)
                .json_body(json!({"promptFeedback": {"blockReason": "OTHER"}}));
        })
        .await;

    let result = provider_for(&server).generate("prompt").await;
    assert_eq!(result.unwrap_err(), LlmError::UnexpectedStructure);
}

#[tokio::test]
async fn test_not_found_propagates_status_and_body() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(404).body("B");
        })
        .await;

    let result = provider_for(&server).generate("prompt").await;
    assert_eq!(
        result.unwrap_err(),
        LlmError::Upstream {
            status: 404,
            body: "B".to_string()
        }
    );
}

#[tokio::test]
async fn test_server_error_propagates_status_and_body() {
    let server = MockServer::start_async().await;

    let body = r#"{"error": {"code": 500, "message": "Internal error encountered."}}"#;
    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(500).body(body);
        })
        .await;

    let result = provider_for(&server).generate("prompt").await;
    assert_eq!(
        result.unwrap_err(),
        LlmError::Upstream {
            status: 500,
            body: body.to_string()
        }
    );
}

#[tokio::test]
async fn test_non_200_success_status_is_not_success() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(204);
        })
        .await;

    let result = provider_for(&server).generate("prompt").await;
    assert!(matches!(
        result,
        Err(LlmError::Upstream { status: 204, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let result = provider_for(&server).generate("prompt").await;
    assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_one_request_per_generate_call() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(503).body("overloaded");
        })
        .await;

    let result = provider_for(&server).generate("prompt").await;
    assert!(result.is_err());

    // No retry on failure
    assert_eq!(mock.hits_async().await, 1);
}
