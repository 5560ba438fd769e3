// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway configuration loaded from environment variables

pub mod gateway;

pub use gateway::{ConfigError, GatewayConfig};
