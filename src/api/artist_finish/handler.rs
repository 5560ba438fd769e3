// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sketch finishing endpoint handler

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::request::FinishForm;
use super::response::FinishResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::artist::{EditAttemptResult, EditErrorCode, StyledImageEditor};

const CONTENT_TYPE_MESSAGE: &str =
    "Use multipart/form-data. Example: curl -F image=@file.png -F style=comic";

/// POST /artist/finish - Finish a sketch in the requested style
///
/// Pipeline:
/// 1. Require a provider credential (500 if absent)
/// 2. Require multipart/form-data and read the form
/// 3. Pick the sketch field and style
/// 4. Run the moderation-fallback editor
/// 5. Map the final classification to the response
pub async fn artist_finish_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FinishResponse>, ApiError> {
    let provider = state.provider()?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.contains("multipart/form-data") {
        return Err(ApiError::invalid_request(CONTENT_TYPE_MESSAGE));
    }
    let multipart = multipart.map_err(|e| {
        warn!("Multipart rejected: {}", e);
        ApiError::invalid_request(CONTENT_TYPE_MESSAGE)
    })?;

    let form = FinishForm::from_multipart(multipart).await?;
    debug!("Artist form received: keys={:?}", form.keys());
    let request = form.into_style_request()?;

    let editor = StyledImageEditor::new(provider, state.config.image_model.clone());
    let result = editor.produce_styled_image(&request).await;

    info!(
        "Artist finish done: style={}, attempts={}, outcome={}",
        request.style,
        result.attempts,
        result.error_code.map(|c| c.as_str()).unwrap_or("success")
    );

    into_http_result(result)
}

/// Map the editor's final classification to the HTTP outcome.
pub fn into_http_result(result: EditAttemptResult) -> Result<Json<FinishResponse>, ApiError> {
    if let Some(response) = FinishResponse::from_result(&result) {
        return Ok(Json(response));
    }

    let detail = result.detail.unwrap_or(Value::Null);
    match result.error_code {
        Some(EditErrorCode::ModerationBlocked) => Err(ApiError::SafetyFilter),
        Some(EditErrorCode::OtherApiError) => Err(ApiError::Upstream {
            status: if result.http_status == 0 {
                500
            } else {
                result.http_status
            },
            error: "OpenAI error".to_string(),
            detail,
        }),
        // non-JSON error page: relay as a provider error with its status
        Some(EditErrorCode::MalformedResponse)
            if result.http_status != 0 && !(200..300).contains(&result.http_status) =>
        {
            Err(ApiError::Upstream {
                status: result.http_status,
                error: "OpenAI error".to_string(),
                detail,
            })
        }
        Some(EditErrorCode::MalformedResponse) | None => Err(ApiError::Upstream {
            status: 500,
            error: "No image in response".to_string(),
            detail,
        }),
    }
}
