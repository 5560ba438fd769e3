// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the sun-api gateway

/// Deployment tag reported by `GET /ver`
pub const VERSION: &str = "2026-01-31-3";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Service name used in banners and health text
pub const SERVICE_NAME: &str = "sun-api";

/// Routes that accept POST, listed in 404 responses
pub const AVAILABLE_ROUTES: &[&str] = &["/chat", "/artist/finish", "/tts", "/ver"];

/// Body of `GET /ver`
pub fn get_version_string() -> String {
    format!("{} version = {}", SERVICE_NAME, VERSION)
}

/// Body of `GET /`
pub fn get_liveness_string() -> String {
    format!("OK - {} is running", SERVICE_NAME)
}
