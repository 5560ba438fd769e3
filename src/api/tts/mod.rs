// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-speech API endpoint module
//!
//! Provides POST /tts returning MP3 audio.

pub mod handler;
pub mod request;

pub use handler::tts_handler;
pub use request::TtsRequest;
