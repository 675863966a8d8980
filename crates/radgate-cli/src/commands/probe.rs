//! Probe command

use anyhow::{Context, Result};
use clap::Args;
use radgate_core::{Decision, SharedSecret};
use radgate_effects::load_gateway_config;
use radgate_radius::{ClientConfig, RadiusClient};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Arguments of `radgate probe`
#[derive(Args)]
pub struct ProbeArgs {
    /// Identity to authenticate, e.g. alice@example.com
    pub identity: String,

    /// Credential to send
    pub credential: String,

    /// Gateway address; defaults to the configured listen address
    #[arg(long)]
    pub server: Option<SocketAddr>,

    /// Shared secret; defaults to the configured one
    #[arg(long)]
    pub secret: Option<String>,

    /// Response timeout in milliseconds
    #[arg(long, default_value = "3000")]
    pub timeout_ms: u64,
}

/// Send one Access-Request and print the decision
pub async fn run(args: ProbeArgs, config_path: &Path) -> Result<()> {
    let (server, secret) = match (args.server, args.secret) {
        (Some(server), Some(secret)) => (server, SharedSecret::new(secret)),
        (server, secret) => {
            let config = load_gateway_config(config_path)
                .await
                .with_context(|| format!("probe needs --server and --secret or {}", config_path.display()))?;
            (
                server.unwrap_or_else(|| reachable(config.listen_addr)),
                secret.map(SharedSecret::new).unwrap_or(config.shared_secret),
            )
        }
    };

    let client = RadiusClient::new(ClientConfig {
        server,
        secret,
        timeout: Duration::from_millis(args.timeout_ms),
    });
    let decision = client
        .authenticate(&args.identity, &args.credential)
        .await
        .with_context(|| format!("no valid answer from {server}"))?;

    println!("{decision}");
    if decision == Decision::Reject {
        std::process::exit(1);
    }
    Ok(())
}

// A wildcard listen address is probed over loopback.
fn reachable(listen: SocketAddr) -> SocketAddr {
    let ip = match listen.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, listen.port())
}
