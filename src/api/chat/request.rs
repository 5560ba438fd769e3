// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat request body

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::gateway::DEFAULT_CHAT_TEMPERATURE;
use crate::openai::ChatCompletionRequest;

/// Body of POST /chat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation, forwarded as-is
    #[serde(default)]
    pub messages: Option<Value>,

    #[serde(default)]
    pub temperature: Option<f64>,

    /// Overrides the configured chat model when non-empty
    #[serde(default)]
    pub model: Option<String>,
}

impl ChatRequest {
    pub fn into_completion(self, default_model: &str) -> ChatCompletionRequest {
        let model = self
            .model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default_model.to_string());
        let messages = match self.messages {
            Some(Value::Null) | None => Value::Array(Vec::new()),
            Some(messages) => messages,
        };

        ChatCompletionRequest {
            model,
            messages,
            temperature: self.temperature.unwrap_or(DEFAULT_CHAT_TEMPERATURE),
        }
    }
}
