// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capability provider trait definition

use async_trait::async_trait;

use super::types::{
    ChatCompletionRequest, ImageEditRequest, ProviderError, SpeechRequest, UpstreamResponse,
};

/// The three upstream operations the gateway relies on.
///
/// Implementations return the upstream HTTP status and body as-is. A
/// non-2xx status is NOT an `Err`: callers decide how to classify it.
/// `Err` is reserved for failures where no response was received.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Relay a chat completion request
    async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<UpstreamResponse, ProviderError>;

    /// Upload an image with an edit prompt
    async fn edit_image(&self, request: &ImageEditRequest)
        -> Result<UpstreamResponse, ProviderError>;

    /// Convert text to speech audio
    async fn synthesize_speech(
        &self,
        request: &SpeechRequest,
    ) -> Result<UpstreamResponse, ProviderError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
