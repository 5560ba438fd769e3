// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenAI-compatible capability provider used by every gateway route

pub mod client;
pub mod provider;
pub mod types;

pub use client::OpenAiClient;
pub use provider::AiProvider;
pub use types::{
    ChatCompletionRequest, ImageEditRequest, ProviderError, SpeechRequest, UpstreamResponse,
};
