// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sketch-to-artwork conversion with moderation fallback
//!
//! A sketch is sent to the image edit endpoint with a style-faithful prompt.
//! When the provider's safety system rejects it, the same sketch is resent
//! with progressively more conservative prompts (three tiers in total).

pub mod editor;
pub mod moderation;
pub mod prompts;
pub mod style;

pub use editor::{EditAttemptResult, EditErrorCode, StyleRequest, StyledImageEditor};
pub use moderation::{is_moderation_blocked, MODERATION_ERROR_CODE};
pub use prompts::PromptTier;
pub use style::ArtStyle;
