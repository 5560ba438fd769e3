// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart form parsing for sketch uploads

use axum_extra::extract::Multipart;
use bytes::Bytes;
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::artist::style::DEFAULT_STYLE;
use crate::artist::{ArtStyle, StyleRequest};

/// Field names accepted for the sketch, in priority order
pub const IMAGE_FIELD_NAMES: [&str; 5] = ["image", "file", "photo", "drawing", "upload"];

pub const STYLE_FIELD_NAME: &str = "style";

/// One part of the submitted form
#[derive(Debug, Clone)]
pub struct UploadedField {
    pub name: String,
    /// Present only for file parts
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedField {
    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }
}

/// All parts of a POST /artist/finish form, in submission order
#[derive(Debug, Clone, Default)]
pub struct FinishForm {
    pub fields: Vec<UploadedField>,
}

impl FinishForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut fields = Vec::new();

        while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::Rejected {
            status: e.status().as_u16(),
            message: e.body_text(),
        })? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(|e| ApiError::Rejected {
                status: e.status().as_u16(),
                message: e.body_text(),
            })?;

            fields.push(UploadedField {
                name,
                file_name,
                content_type,
                data,
            });
        }

        Ok(Self { fields })
    }

    fn first(&self, name: &str) -> Option<&UploadedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in submission order, duplicates included
    pub fn keys(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    fn keys_value(&self) -> Value {
        Value::Array(self.keys().into_iter().map(Value::String).collect())
    }

    pub fn style(&self) -> ArtStyle {
        self.first(STYLE_FIELD_NAME)
            .map(|f| String::from_utf8_lossy(&f.data).into_owned())
            .filter(|s| !s.is_empty())
            .map(|s| ArtStyle::parse(&s))
            .unwrap_or_else(|| ArtStyle::parse(DEFAULT_STYLE))
    }

    /// Validate the form and build the editor request.
    pub fn into_style_request(self) -> Result<StyleRequest, ApiError> {
        let image = IMAGE_FIELD_NAMES
            .iter()
            .find_map(|name| self.first(name))
            .ok_or_else(|| {
                ApiError::invalid_request("No file found")
                    .with_context("gotKeys", self.keys_value())
            })?;

        if !image.is_file() {
            return Err(ApiError::invalid_request("Uploaded value is not a file/blob")
                .with_context("gotType", Value::String("string".to_string()))
                .with_context("gotKeys", self.keys_value()));
        }

        if image.data.is_empty() {
            return Err(ApiError::invalid_request("Uploaded file is empty"));
        }

        Ok(StyleRequest::new(
            image.data.clone(),
            image.file_name.as_deref(),
            self.style(),
        )
        .with_content_type(image.content_type.clone()))
    }
}
