//! HTTP request handlers for the Gateway.
//!
//! Implements the extraction and health check endpoints using axum.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use grievance_domain::{ExtractionResult, GrievanceRequest, LlmProvider};
use grievance_extractor::{Extractor, ExtractorError, StructuredExtraction};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

/// Shared application state
pub struct AppState<L>
where
    L: LlmProvider,
{
    /// Extractor wrapping the configured model provider
    pub extractor: Arc<Extractor<L>>,
}

impl<L> AppState<L>
where
    L: LlmProvider + Send + Sync + 'static,
    ExtractorError: From<L::Error>,
{
    /// Create state around an extractor
    pub fn new(extractor: Extractor<L>) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }
}

impl<L: LlmProvider> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Model the gateway forwards to
    pub model: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Extraction failed
    Extraction(ExtractorError),
    /// Request body could not be read as JSON
    InvalidBody(String),
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Extraction(ExtractorError::EmptyText) => StatusCode::BAD_REQUEST,
            AppError::Extraction(ExtractorError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Extraction(ExtractorError::UnexpectedStructure)
            | AppError::Extraction(ExtractorError::Internal(_))
            | AppError::InvalidBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Extraction(e) => e.to_string(),
            AppError::InvalidBody(msg) => msg,
        };

        let body = Json(ExtractionResult::error(message));
        (status, body).into_response()
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Extraction(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        AppError::InvalidBody(rejection.body_text())
    }
}

/// POST /predict - Extract grievance fields, relaying the model reply verbatim
async fn predict<L>(
    State(state): State<AppState<L>>,
    payload: Result<Json<GrievanceRequest>, JsonRejection>,
) -> Result<Json<ExtractionResult>, AppError>
where
    L: LlmProvider + Send + Sync + 'static,
    ExtractorError: From<L::Error>,
{
    let Json(request) = payload?;
    let text = request.grievance_text().ok_or(ExtractorError::EmptyText)?;

    let response = state.extractor.extract(text).await?;

    Ok(Json(ExtractionResult::response(response)))
}

/// POST /predict/structured - Same as /predict, plus parsed fields
async fn predict_structured<L>(
    State(state): State<AppState<L>>,
    payload: Result<Json<GrievanceRequest>, JsonRejection>,
) -> Result<Json<StructuredExtraction>, AppError>
where
    L: LlmProvider + Send + Sync + 'static,
    ExtractorError: From<L::Error>,
{
    let Json(request) = payload?;
    let text = request.grievance_text().ok_or(ExtractorError::EmptyText)?;

    let result = state.extractor.extract_structured(text).await?;
    debug!("Structured fields parsed: {}", result.fields.is_some());

    Ok(Json(result))
}

/// GET /health - Liveness check, does not contact the model
async fn health_check<L>(State(state): State<AppState<L>>) -> Json<HealthCheckResponse>
where
    L: LlmProvider + Send + Sync + 'static,
    ExtractorError: From<L::Error>,
{
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        model: state.extractor.model_name().to_string(),
    })
}

/// CORS policy: any origin, method and header
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the axum router with all routes
pub fn create_router<L>(state: AppState<L>) -> AxumRouter
where
    L: LlmProvider + Send + Sync + 'static,
    ExtractorError: From<L::Error>,
{
    AxumRouter::new()
        .route("/predict", post(predict::<L>))
        .route("/predict/structured", post(predict_structured::<L>))
        .route("/health", get(health_check::<L>))
        .layer(cors_layer())
        .with_state(state)
}
