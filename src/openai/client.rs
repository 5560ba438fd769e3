// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! reqwest-backed client for the OpenAI REST API

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info};

use super::provider::AiProvider;
use super::types::{
    ChatCompletionRequest, ImageEditRequest, ProviderError, SpeechRequest, UpstreamResponse,
};

/// Client for the OpenAI chat, image edit and speech endpoints
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new client. The credential is bound here and never read again
    /// from the environment.
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("OpenAI client configured: base_url={}", base_url);

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<UpstreamResponse, ProviderError> {
        let response = builder.bearer_auth(&self.api_key).send().await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("OpenAI responded: status={}, bytes={}", status, body.len());
        Ok(UpstreamResponse::new(status, body))
    }
}

/// MIME type for an uploaded image: the uploader's value when present,
/// otherwise derived from the file extension.
pub fn image_mime_type(filename: &str, content_type: Option<&str>) -> String {
    if let Some(ct) = content_type.map(str::trim).filter(|ct| ct.starts_with("image/")) {
        return ct.to_string();
    }
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "image/png",
    }
    .to_string()
}

#[async_trait]
impl AiProvider for OpenAiClient {
    async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamResponse, ProviderError> {
        let url = self.endpoint("chat/completions");
        debug!("OpenAI chat POST {} model={}", url, request.model);
        self.send(self.client.post(&url).json(request)).await
    }

    async fn edit_image(
        &self,
        request: &ImageEditRequest,
    ) -> Result<UpstreamResponse, ProviderError> {
        let url = self.endpoint("images/edits");
        debug!(
            "OpenAI image edit POST {} model={}, bytes={}, prompt_len={}",
            url,
            request.model,
            request.image.len(),
            request.prompt.len()
        );

        let mime = image_mime_type(&request.filename, request.content_type.as_deref());
        let image = Part::bytes(request.image.to_vec())
            .file_name(request.filename.clone())
            .mime_str(&mime)?;

        let form = Form::new()
            .text("model", request.model.clone())
            .part("image", image)
            .text("prompt", request.prompt.clone());

        self.send(self.client.post(&url).multipart(form)).await
    }

    async fn synthesize_speech(
        &self,
        request: &SpeechRequest,
    ) -> Result<UpstreamResponse, ProviderError> {
        if request.input.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "speech input must not be empty".to_string(),
            ));
        }
        let url = self.endpoint("audio/speech");
        debug!(
            "OpenAI speech POST {} model={}, voice={}, chars={}",
            url,
            request.model,
            request.voice,
            request.input.chars().count()
        );
        self.send(self.client.post(&url).json(request)).await
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
