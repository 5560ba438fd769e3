// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod artist_finish;
pub mod chat;
pub mod errors;
pub mod http_server;
pub mod tts;

pub use artist_finish::{artist_finish_handler, FinishForm, FinishResponse};
pub use chat::{chat_handler, ChatRequest};
pub use errors::{ApiError, ErrorResponse};
pub use http_server::{create_app, start_server, AppState};
pub use tts::{tts_handler, TtsRequest};
