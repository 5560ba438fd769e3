// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::artist_finish::artist_finish_handler;
use super::chat::chat_handler;
use super::errors::ApiError;
use super::tts::tts_handler;
use crate::config::GatewayConfig;
use crate::openai::{AiProvider, OpenAiClient, ProviderError};
use crate::version;

/// Shared, immutable per-process state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    /// Absent when no provider credential is configured
    pub provider: Option<Arc<dyn AiProvider>>,
}

impl AppState {
    pub fn new(config: GatewayConfig, provider: Option<Arc<dyn AiProvider>>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// Build state with an OpenAI client when an API key is configured.
    pub fn from_config(config: GatewayConfig) -> Result<Self, ProviderError> {
        let provider: Option<Arc<dyn AiProvider>> = match config.openai_api_key.as_deref() {
            Some(key) => Some(Arc::new(OpenAiClient::new(
                key,
                &config.openai_base_url,
                config.request_timeout(),
            )?)),
            None => {
                warn!("OPENAI_API_KEY not set; POST routes will return 500");
                None
            }
        };
        Ok(Self::new(config, provider))
    }

    /// Provider for POST routes, or the missing-credential error
    pub fn provider(&self) -> Result<Arc<dyn AiProvider>, ApiError> {
        self.provider.clone().ok_or(ApiError::MissingApiKey)
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(liveness_handler).fallback(unmatched_handler))
        .route("/ver", get(version_handler).fallback(unmatched_handler))
        .route("/health", get(health_handler).fallback(unmatched_handler))
        .route("/chat", post(chat_handler).fallback(unmatched_handler))
        .route(
            "/artist/finish",
            post(artist_finish_handler).fallback(unmatched_handler),
        )
        .route("/tts", post(tts_handler).fallback(unmatched_handler))
        .fallback(unmatched_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = state.config.listen_addr();
    let app = create_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} listening on {}", version::SERVICE_NAME, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn liveness_handler() -> String {
    version::get_liveness_string()
}

async fn version_handler() -> String {
    version::get_version_string()
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Everything no route method matched: bare OPTIONS, other non-POST
/// methods, and POSTs to unknown paths.
async fn unmatched_handler(State(state): State<Arc<AppState>>, method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    if method != Method::POST {
        return ApiError::MethodNotAllowed.into_response();
    }
    if state.provider.is_none() {
        return ApiError::MissingApiKey.into_response();
    }
    ApiError::NotFound.into_response()
}
