// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sketch finishing API endpoint module
//!
//! Provides POST /artist/finish (multipart upload) returning a styled PNG as a
//! data URL.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::artist_finish_handler;
pub use request::{FinishForm, UploadedField, IMAGE_FIELD_NAMES};
pub use response::FinishResponse;
