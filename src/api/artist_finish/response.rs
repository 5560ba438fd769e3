// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sketch finishing response types

use serde::{Deserialize, Serialize};

use crate::artist::EditAttemptResult;

/// Successful response of POST /artist/finish
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinishResponse {
    /// `data:image/png;base64,...`
    pub image: String,
}

impl FinishResponse {
    pub fn from_result(result: &EditAttemptResult) -> Option<Self> {
        result.data_url().map(|image| Self { image })
    }
}
