// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Moderation-fallback image editor

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::moderation::is_moderation_blocked;
use super::prompts::PromptTier;
use super::style::ArtStyle;
use crate::openai::{AiProvider, ImageEditRequest, ProviderError, UpstreamResponse};

/// Filename used when the upload carries none
pub const DEFAULT_FILENAME: &str = "input.png";

/// Status reported when the provider could not be reached
pub const TRANSPORT_FAILURE_STATUS: u16 = 502;

/// A sketch and the style it should be finished in
#[derive(Debug, Clone)]
pub struct StyleRequest {
    pub image: Bytes,
    pub filename: String,
    pub content_type: Option<String>,
    pub style: ArtStyle,
}

impl StyleRequest {
    pub fn new(image: Bytes, filename: Option<&str>, style: ArtStyle) -> Self {
        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        Self {
            image,
            filename,
            content_type: None,
            style,
        }
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Failure classes of an edit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditErrorCode {
    /// Rejected by the provider's safety system
    ModerationBlocked,
    /// Any other provider or transport failure
    OtherApiError,
    /// Response lacked parseable JSON or the image payload
    MalformedResponse,
}

impl EditErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModerationBlocked => "moderation_blocked",
            Self::OtherApiError => "other_api_error",
            Self::MalformedResponse => "malformed_response",
        }
    }
}

/// Classified outcome of one attempt, and of the whole sequence
#[derive(Debug, Clone, PartialEq)]
pub struct EditAttemptResult {
    pub succeeded: bool,
    pub image_base64: Option<String>,
    pub error_code: Option<EditErrorCode>,
    pub http_status: u16,
    /// Raw provider payload (or transport message) for diagnostics
    pub detail: Option<Value>,
    /// Tier of the attempt that produced this result
    pub tier: PromptTier,
    /// Number of provider calls made so far
    pub attempts: u8,
}

impl EditAttemptResult {
    fn success(image_base64: String, http_status: u16, tier: PromptTier) -> Self {
        Self {
            succeeded: true,
            image_base64: Some(image_base64),
            error_code: None,
            http_status,
            detail: None,
            tier,
            attempts: tier.rank() + 1,
        }
    }

    fn failure(
        code: EditErrorCode,
        http_status: u16,
        detail: Option<Value>,
        tier: PromptTier,
    ) -> Self {
        Self {
            succeeded: false,
            image_base64: None,
            error_code: Some(code),
            http_status,
            detail,
            tier,
            attempts: tier.rank() + 1,
        }
    }

    pub fn is_moderation_blocked(&self) -> bool {
        self.error_code == Some(EditErrorCode::ModerationBlocked)
    }

    /// `data:` URL of the produced PNG
    pub fn data_url(&self) -> Option<String> {
        self.image_base64
            .as_ref()
            .map(|b64| format!("data:image/png;base64,{}", b64))
    }
}

/// Classify the outcome of a single edit call.
pub fn classify_attempt(
    outcome: Result<UpstreamResponse, ProviderError>,
    tier: PromptTier,
) -> EditAttemptResult {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            return EditAttemptResult::failure(
                EditErrorCode::OtherApiError,
                TRANSPORT_FAILURE_STATUS,
                Some(Value::String(e.to_string())),
                tier,
            );
        }
    };

    let Some(body) = response.json() else {
        return EditAttemptResult::failure(
            EditErrorCode::MalformedResponse,
            response.status,
            None,
            tier,
        );
    };

    if !response.is_success() {
        let code = if is_moderation_blocked(&body) {
            EditErrorCode::ModerationBlocked
        } else {
            EditErrorCode::OtherApiError
        };
        return EditAttemptResult::failure(code, response.status, Some(body), tier);
    }

    let image = body
        .pointer("/data/0/b64_json")
        .and_then(Value::as_str)
        .filter(|b64| !b64.is_empty())
        .map(str::to_string);

    match image {
        Some(b64) => EditAttemptResult::success(b64, response.status, tier),
        None => EditAttemptResult::failure(
            EditErrorCode::MalformedResponse,
            response.status,
            Some(body),
            tier,
        ),
    }
}

/// Finishes sketches through the image edit capability, retrying with safer
/// prompts while the provider reports moderation blocks.
pub struct StyledImageEditor {
    provider: Arc<dyn AiProvider>,
    model: String,
}

impl StyledImageEditor {
    pub fn new(provider: Arc<dyn AiProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Run the fallback sequence for one sketch.
    ///
    /// At most one call per tier. Stops at the first attempt that is not a
    /// moderation block; the returned result is that attempt's classification.
    pub async fn produce_styled_image(&self, request: &StyleRequest) -> EditAttemptResult {
        debug!(
            "Styled image requested: style={}, filename={}, bytes={}",
            request.style,
            request.filename,
            request.image.len()
        );

        let mut last: Option<EditAttemptResult> = None;
        for tier in PromptTier::ALL {
            let result = self.attempt(request, tier).await;
            if !result.is_moderation_blocked() {
                return result;
            }
            warn!(
                "Edit blocked by moderation: style={}, tier={}, status={}",
                request.style,
                tier.as_str(),
                result.http_status
            );
            last = Some(result);
        }

        // every tier was moderation-blocked
        last.unwrap_or_else(|| {
            EditAttemptResult::failure(
                EditErrorCode::ModerationBlocked,
                0,
                None,
                PromptTier::Universal,
            )
        })
    }

    async fn attempt(&self, request: &StyleRequest, tier: PromptTier) -> EditAttemptResult {
        let edit = ImageEditRequest {
            model: self.model.clone(),
            image: request.image.clone(),
            filename: request.filename.clone(),
            content_type: request.content_type.clone(),
            prompt: tier.prompt(&request.style),
        };

        let outcome = self.provider.edit_image(&edit).await;
        let result = classify_attempt(outcome, tier);

        info!(
            "Edit attempt {}: provider={}, tier={}, status={}, outcome={}",
            result.attempts,
            self.provider.name(),
            tier.as_str(),
            result.http_status,
            result.error_code.map(|c| c.as_str()).unwrap_or("success")
        );
        result
    }
}
