// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-speech endpoint handler

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::request::TtsRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

const CONTENT_TYPE_MESSAGE: &str =
    "Use application/json. Body: { input, voice, model?, speed?, instructions? }";

/// Characters of a non-JSON provider error kept in the response
const ERROR_TEXT_LIMIT: usize = 300;

/// POST /tts - Synthesize speech
///
/// Pipeline:
/// 1. Require a provider credential (500 if absent)
/// 2. Require a JSON content type and a usable `input`
/// 3. Call the speech capability
/// 4. Relay audio bytes, or wrap the provider error with its status
pub async fn tts_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let provider = state.provider()?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.contains("application/json") {
        return Err(ApiError::invalid_request(CONTENT_TYPE_MESSAGE));
    }

    let json: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;
    let request = TtsRequest::from_json(&json).map_err(|e| {
        warn!("TTS request rejected: {}", e);
        ApiError::invalid_request(e)
    })?;
    let speech = request.into_speech(&state.config.tts_model, &state.config.tts_voice);

    debug!(
        "TTS request: model={}, voice={}, speed={}, chars={}",
        speech.model,
        speech.voice,
        speech.speed,
        speech.input.chars().count()
    );

    let upstream = provider.synthesize_speech(&speech).await.map_err(|e| {
        warn!("TTS provider call failed: {}", e);
        ApiError::BadGateway(e.to_string())
    })?;

    if !upstream.is_success() {
        warn!("TTS provider error: status={}", upstream.status);
        let detail = upstream.json().unwrap_or_else(|| {
            Value::String(upstream.text().chars().take(ERROR_TEXT_LIMIT).collect())
        });
        return Err(ApiError::Upstream {
            status: upstream.status,
            error: "OpenAI TTS error".to_string(),
            detail,
        });
    }

    info!(
        "TTS completed: voice={}, audio_bytes={}",
        speech.voice,
        upstream.body.len()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        upstream.body,
    )
        .into_response())
}
