// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Moderation-block signature of provider error payloads
//!
//! Matching is coupled to the provider's error format
//! (`{"error": {"code": ..., "message": ...}}`). Payloads of any other shape
//! never match and are treated as ordinary API errors.

use serde_json::Value;

/// Error code the provider uses for moderation rejections
pub const MODERATION_ERROR_CODE: &str = "moderation_blocked";

/// Lower-case substring that marks a safety-system rejection message
pub const SAFETY_MESSAGE_MARKER: &str = "safety";

/// Returns true if an error payload signals a content-moderation rejection.
pub fn is_moderation_blocked(payload: &Value) -> bool {
    let Some(error) = payload.get("error") else {
        return false;
    };

    if error.get("code").and_then(Value::as_str) == Some(MODERATION_ERROR_CODE) {
        return true;
    }

    error
        .get("message")
        .and_then(Value::as_str)
        .map(|msg| msg.to_lowercase().contains(SAFETY_MESSAGE_MARKER))
        .unwrap_or(false)
}
