//! Grievance Gateway
//!
//! HTTP front door for grievance field extraction. Accepts free text on
//! `POST /predict`, forwards an extraction prompt to the Gemini API and
//! relays the model's reply.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::GatewayConfig;
use grievance_extractor::Extractor;
use grievance_llm::GeminiProvider;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Gateway error
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the Gateway HTTP server
///
/// Validates configuration, builds the Gemini provider and extractor,
/// and starts the axum server.
pub async fn start_server(config: GatewayConfig) -> Result<(), GatewayError> {
    init_tracing();

    config.validate()?;

    info!("Starting Grievance Gateway");
    info!("Bind address: {}", config.bind_addr());
    info!("Upstream model: {}", config.upstream.model);

    let provider = GeminiProvider::new(
        config.upstream.base_url.clone(),
        config.upstream.model.clone(),
        config.api_key()?,
    );

    let state = AppState::new(Extractor::new(provider));
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Gateway listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| GatewayError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_server_requires_api_key() {
        let config = GatewayConfig::default();
        let result = start_server(config).await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_error_display() {
        let error = GatewayError::from(config::ConfigError::MissingField(
            "upstream.api_key".to_string(),
        ));
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required configuration field: upstream.api_key"
        );
    }
}
