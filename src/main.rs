// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use sun_api::{start_server, version, AppState, GatewayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting {} (version {}, build {})",
        version::SERVICE_NAME,
        version::VERSION,
        version::VERSION_NUMBER
    );

    let config = GatewayConfig::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Config: listen={}, base_url={}, api_key_set={}",
        config.listen_addr(),
        config.openai_base_url,
        config.has_api_key()
    );
    info!(
        "Models: chat={}, image={}, tts={}",
        config.chat_model, config.image_model, config.tts_model
    );

    let state = AppState::from_config(config).context("failed to build OpenAI client")?;
    start_server(state).await.context("server error")?;

    Ok(())
}
