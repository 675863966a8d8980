//! Serve command

use anyhow::{Context, Result};
use radgate_agent::GatewayBuilder;
use radgate_effects::load_gateway_config;
use std::path::Path;

/// Load the configuration, start the gateway and serve until Ctrl-C
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_gateway_config(config_path)
        .await
        .with_context(|| format!("cannot start with {}", config_path.display()))?;

    let gateway = GatewayBuilder::new(config)
        .build()
        .await
        .context("failed to start gateway")?;
    let addr = gateway.local_addr()?;
    tracing::info!(addr = %addr, "radgate serving; press Ctrl-C to stop");

    gateway
        .run_until(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Interrupt received, shutting down"),
                Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C; shutting down"),
            }
        })
        .await?;
    Ok(())
}
