// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the edge gateway

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";
pub const DEFAULT_TTS_MODEL: &str = "gpt-4o-mini-tts";
pub const DEFAULT_TTS_VOICE: &str = "alloy";
pub const DEFAULT_TTS_SPEED: f64 = 1.25;
pub const DEFAULT_CHAT_TEMPERATURE: f64 = 0.7;

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be greater than 0")]
    InvalidPort,

    #[error("REQUEST_TIMEOUT_SECS must be greater than 0")]
    InvalidTimeout,

    #[error("MAX_UPLOAD_BYTES must be greater than 0")]
    InvalidUploadLimit,

    #[error("OPENAI_BASE_URL must not be empty")]
    EmptyBaseUrl,
}

/// Runtime configuration for the gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Provider credential; POST routes refuse to run without it
    pub openai_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub openai_base_url: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Default model for /chat when the client sends none
    pub chat_model: String,
    /// Model used for sketch edits
    pub image_model: String,
    /// Default TTS model
    pub tts_model: String,
    /// Default TTS voice
    pub tts_voice: String,
    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            openai_base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            chat_model: env::var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            image_model: env::var("IMAGE_MODEL").unwrap_or(defaults.image_model),
            tts_model: env::var("TTS_MODEL").unwrap_or(defaults.tts_model),
            tts_voice: env::var("TTS_VOICE").unwrap_or(defaults.tts_voice),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidUploadLimit);
        }
        if self.openai_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(())
    }

    /// Whether the provider credential is present
    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 10000,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            tts_voice: DEFAULT_TTS_VOICE.to_string(),
            request_timeout_secs: 120,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}
