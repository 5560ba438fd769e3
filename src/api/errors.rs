// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::version::AVAILABLE_ROUTES;

/// Message shown to users when every prompt tier was moderation-blocked
pub const SAFETY_FILTER_DETAIL: &str =
    "이미지가 안전 검사에서 차단되었습니다. 다른 스케치로 시도해 주세요.";

/// JSON error envelope: `{"error": ..., "detail": ..., <context>}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            context: Map::new(),
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_context(mut self, key: &str, value: Value) -> Self {
        self.context.insert(key.to_string(), value);
        self
    }
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Non-POST request outside the GET routes; rendered as plain text
    MethodNotAllowed,
    /// POST to an unknown path
    NotFound,
    MissingApiKey,
    InvalidRequest {
        message: String,
        context: Map<String, Value>,
    },
    /// Body rejected before it reached a handler (size limit, broken multipart)
    Rejected {
        status: u16,
        message: String,
    },
    /// Every prompt tier was moderation-blocked
    SafetyFilter,
    /// Provider answered with an error; relayed with its status
    Upstream {
        status: u16,
        error: String,
        detail: Value,
    },
    /// Provider could not be reached
    BadGateway(String),
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest {
            message: message.into(),
            context: Map::new(),
        }
    }

    pub fn with_context(self, key: &str, value: Value) -> Self {
        match self {
            ApiError::InvalidRequest {
                message,
                mut context,
            } => {
                context.insert(key.to_string(), value);
                ApiError::InvalidRequest { message, context }
            }
            other => other,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ApiError::MethodNotAllowed => ErrorResponse::new("Only POST allowed"),
            ApiError::NotFound => ErrorResponse::new("Not Found").with_context(
                "available",
                Value::Array(
                    AVAILABLE_ROUTES
                        .iter()
                        .map(|r| Value::String(r.to_string()))
                        .collect(),
                ),
            ),
            ApiError::MissingApiKey => ErrorResponse::new("OPENAI_API_KEY not configured"),
            ApiError::InvalidRequest { message, context } => ErrorResponse {
                error: message.clone(),
                detail: None,
                context: context.clone(),
            },
            ApiError::Rejected { message, .. } => ErrorResponse::new(message.clone()),
            ApiError::SafetyFilter => ErrorResponse::new("safety_filter")
                .with_detail(Value::String(SAFETY_FILTER_DETAIL.to_string())),
            ApiError::Upstream { error, detail, .. } => {
                ErrorResponse::new(error.clone()).with_detail(detail.clone())
            }
            ApiError::BadGateway(msg) => ErrorResponse::new(msg.clone()),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MethodNotAllowed => 405,
            ApiError::NotFound => 404,
            ApiError::MissingApiKey => 500,
            ApiError::InvalidRequest { .. } | ApiError::SafetyFilter => 400,
            ApiError::Rejected { status, .. } | ApiError::Upstream { status, .. } => *status,
            ApiError::BadGateway(_) => 502,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::MissingApiKey => write!(f, "OPENAI_API_KEY not configured"),
            ApiError::InvalidRequest { message, .. } => write!(f, "Invalid request: {}", message),
            ApiError::Rejected { status, message } => {
                write!(f, "Request rejected ({}): {}", status, message)
            }
            ApiError::SafetyFilter => write!(f, "Blocked by safety filter"),
            ApiError::Upstream { status, error, .. } => {
                write!(f, "{} (status {})", error, status)
            }
            ApiError::BadGateway(msg) => write!(f, "Upstream unreachable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if let ApiError::MethodNotAllowed = self {
            return (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                "Only POST allowed",
            )
                .into_response();
        }

        (status, Json(self.to_response())).into_response()
    }
}
