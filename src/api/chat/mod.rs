// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat completion relay
//!
//! Provides POST /chat, forwarding the conversation to the provider and
//! returning its answer untouched.

pub mod handler;
pub mod request;

pub use handler::chat_handler;
pub use request::ChatRequest;
