// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// tests/common/mod.rs - Scripted provider and request helpers shared by suites

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use sun_api::openai::{ChatCompletionRequest, ImageEditRequest, SpeechRequest};
use sun_api::{AiProvider, AppState, GatewayConfig, ProviderError, UpstreamResponse};

type Scripted = Result<UpstreamResponse, ProviderError>;

/// Fake provider replaying queued responses and recording every call.
///
/// An unscripted call returns `ProviderError::InvalidRequest`.
#[derive(Default)]
pub struct ScriptedProvider {
    edits: Mutex<VecDeque<Scripted>>,
    chats: Mutex<VecDeque<Scripted>>,
    speeches: Mutex<VecDeque<Scripted>>,
    edit_calls: Mutex<Vec<ImageEditRequest>>,
    chat_calls: Mutex<Vec<ChatCompletionRequest>>,
    speech_calls: Mutex<Vec<SpeechRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edit(self, response: Scripted) -> Self {
        self.edits.lock().unwrap().push_back(response);
        self
    }

    pub fn with_chat(self, response: Scripted) -> Self {
        self.chats.lock().unwrap().push_back(response);
        self
    }

    pub fn with_speech(self, response: Scripted) -> Self {
        self.speeches.lock().unwrap().push_back(response);
        self
    }

    pub fn edit_calls(&self) -> Vec<ImageEditRequest> {
        self.edit_calls.lock().unwrap().clone()
    }

    pub fn edit_prompts(&self) -> Vec<String> {
        self.edit_calls().into_iter().map(|c| c.prompt).collect()
    }

    pub fn chat_calls(&self) -> Vec<ChatCompletionRequest> {
        self.chat_calls.lock().unwrap().clone()
    }

    pub fn speech_calls(&self) -> Vec<SpeechRequest> {
        self.speech_calls.lock().unwrap().clone()
    }

    fn next(queue: &Mutex<VecDeque<Scripted>>) -> Scripted {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::InvalidRequest("unscripted call".to_string())))
    }
}

#[async_trait]
impl AiProvider for ScriptedProvider {
    async fn complete_chat(&self, request: &ChatCompletionRequest) -> Scripted {
        self.chat_calls.lock().unwrap().push(request.clone());
        Self::next(&self.chats)
    }

    async fn edit_image(&self, request: &ImageEditRequest) -> Scripted {
        self.edit_calls.lock().unwrap().push(request.clone());
        Self::next(&self.edits)
    }

    async fn synthesize_speech(&self, request: &SpeechRequest) -> Scripted {
        self.speech_calls.lock().unwrap().push(request.clone());
        Self::next(&self.speeches)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn moderation_blocked(status: u16) -> Scripted {
    Ok(UpstreamResponse::json_body(
        status,
        &json!({"error": {"code": "moderation_blocked", "message": "Request blocked"}}),
    ))
}

pub fn image_ok(b64: &str) -> Scripted {
    Ok(UpstreamResponse::json_body(
        200,
        &json!({"created": 1, "data": [{"b64_json": b64}]}),
    ))
}

pub fn api_error(status: u16, code: &str) -> Scripted {
    Ok(UpstreamResponse::json_body(
        status,
        &json!({"error": {"code": code, "message": "upstream failure"}}),
    ))
}

/// State holding `provider` with default config
pub fn state_with(provider: Arc<ScriptedProvider>) -> Arc<AppState> {
    let provider: Arc<dyn AiProvider> = provider;
    Arc::new(AppState::new(GatewayConfig::default(), Some(provider)))
}

/// State holding `provider` with a custom config
pub fn state_with_config(
    config: GatewayConfig,
    provider: Arc<ScriptedProvider>,
) -> Arc<AppState> {
    let provider: Arc<dyn AiProvider> = provider;
    Arc::new(AppState::new(config, Some(provider)))
}

/// State with no provider credential
pub fn state_without_key() -> Arc<AppState> {
    Arc::new(AppState::new(GatewayConfig::default(), None))
}

pub const BOUNDARY: &str = "sunapitestboundary7MA4YWxk";

pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn multipart_body(parts: &[FormPart]) -> Bytes {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    Bytes::from(body)
}
