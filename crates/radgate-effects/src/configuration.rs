//! Configuration and directory file loading

use radgate_core::config::parse_directory;
use radgate_core::{DirectoryEntry, GateError, GatewayConfig, Result};
use std::path::Path;
use tokio::fs;

async fn read_text(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| GateError::config(format!("Failed to read {what} {}: {e}", path.display())))
}

/// Read and validate the gateway configuration file
pub async fn load_gateway_config(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let config = GatewayConfig::parse(&read_text(path, "config file").await?)?;
    tracing::debug!(
        path = %path.display(),
        listen = %config.listen_addr,
        verifier = config.verifier.kind(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Read the static user directory file
pub async fn load_directory(path: impl AsRef<Path>) -> Result<Vec<DirectoryEntry>> {
    let path = path.as_ref();
    let entries = parse_directory(&read_text(path, "directory file").await?);
    if entries.is_empty() {
        tracing::warn!(path = %path.display(), "User directory is empty; every request will be rejected");
    }
    Ok(entries)
}
