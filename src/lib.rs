// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod artist;
pub mod config;
pub mod openai;
pub mod version;

pub use api::http_server::{create_app, start_server, AppState};
pub use artist::{
    ArtStyle, EditAttemptResult, EditErrorCode, PromptTier, StyleRequest, StyledImageEditor,
};
pub use config::{ConfigError, GatewayConfig};
pub use openai::{AiProvider, OpenAiClient, ProviderError, UpstreamResponse};
