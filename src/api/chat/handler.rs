// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat endpoint handler

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::request::ChatRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /chat - Relay a chat completion
///
/// The provider's status and body are returned verbatim.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let provider = state.provider()?;

    let request: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Chat request body rejected: {}", e);
        ApiError::invalid_request(format!("Invalid JSON: {}", e))
    })?;
    let completion = request.into_completion(&state.config.chat_model);

    debug!(
        "Chat request: model={}, temperature={}",
        completion.model, completion.temperature
    );

    let upstream = provider.complete_chat(&completion).await.map_err(|e| {
        warn!("Chat provider call failed: {}", e);
        ApiError::BadGateway(e.to_string())
    })?;

    info!(
        "Chat completed: model={}, status={}, bytes={}",
        completion.model,
        upstream.status,
        upstream.body.len()
    );

    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        upstream.body,
    )
        .into_response())
}
