//! Check command

use anyhow::{Context, Result};
use radgate_agent::build_verifier;
use radgate_core::{GatewayConfig, VerifierConfig};
use radgate_effects::load_gateway_config;
use std::path::Path;

/// Validate the configuration and the verifier backend it names
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_gateway_config(config_path)
        .await
        .with_context(|| format!("invalid configuration {}", config_path.display()))?;
    build_verifier(&config.verifier)
        .await
        .context("verifier backend cannot be built")?;

    println!("{}", summary(&config));
    Ok(())
}

fn summary(config: &GatewayConfig) -> String {
    let verifier = match &config.verifier {
        VerifierConfig::Remote { url, timeout } => {
            format!("remote {url} (timeout {} ms)", timeout.as_millis())
        }
        VerifierConfig::Directory { path } => format!("directory {}", path.display()),
    };
    let secret = if config.default_secret {
        "built-in default"
    } else {
        "configured"
    };

    format!(
        "listen:        {}\n\
         shared secret: {secret}\n\
         verifier:      {verifier}\n\
         audit log:     {} (qualifier key '{}', queue {})",
        config.listen_addr,
        config.audit.log_path.display(),
        config.audit.qualifier_field.key(),
        config.audit.queue_capacity,
    )
}
