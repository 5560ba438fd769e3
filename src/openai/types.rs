// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request, response and error types shared by provider implementations

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Chat completion payload forwarded to `/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    /// Passed through untouched; the gateway does not inspect messages
    pub messages: Value,
    pub temperature: f64,
}

/// One image edit call
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    pub model: String,
    pub image: Bytes,
    pub filename: String,
    /// MIME type reported by the uploader, if any
    pub content_type: Option<String>,
    pub prompt: String,
}

/// Text-to-speech payload forwarded to `/audio/speech`
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest {
    pub model: String,
    pub input: String,
    pub voice: String,
    pub speed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Raw upstream response
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Build a JSON response (used by in-process providers)
    pub fn json_body(status: u16, value: &Value) -> Self {
        Self::new(status, Bytes::from(value.to_string()))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON; `None` when it is not valid JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Body decoded as UTF-8, lossily
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failures where no upstream response was obtained
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or HTTP client error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
