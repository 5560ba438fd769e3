// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-speech request parsing and validation

use serde_json::Value;

use crate::config::gateway::DEFAULT_TTS_SPEED;
use crate::openai::SpeechRequest;

pub const INVALID_INPUT_MESSAGE: &str = "Missing or invalid 'input' (text to speak)";

/// Body of POST /tts
///
/// Kept loose: `input` may arrive as `text`, and empty strings count as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct TtsRequest {
    pub input: String,
    pub voice: Option<String>,
    pub model: Option<String>,
    pub speed: Option<f64>,
    pub instructions: Option<String>,
}

fn non_empty_str(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// JS-style truthiness, used to pick between `input` and `text`
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl TtsRequest {
    /// Parse a decoded JSON body.
    pub fn from_json(body: &Value) -> Result<Self, String> {
        let input = ["input", "text"]
            .iter()
            .filter_map(|key| body.get(*key))
            .find(|v| is_truthy(v))
            .and_then(Value::as_str)
            .ok_or_else(|| INVALID_INPUT_MESSAGE.to_string())?;

        Ok(Self {
            input: input.to_string(),
            voice: non_empty_str(body, "voice"),
            model: non_empty_str(body, "model"),
            speed: body.get("speed").and_then(Value::as_f64),
            instructions: non_empty_str(body, "instructions"),
        })
    }

    pub fn into_speech(self, default_model: &str, default_voice: &str) -> SpeechRequest {
        SpeechRequest {
            model: self.model.unwrap_or_else(|| default_model.to_string()),
            input: self.input,
            voice: self.voice.unwrap_or_else(|| default_voice.to_string()),
            speed: self.speed.unwrap_or(DEFAULT_TTS_SPEED),
            instructions: self.instructions,
        }
    }
}
