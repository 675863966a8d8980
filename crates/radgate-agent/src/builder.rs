//! Gateway assembly from configuration
//!
//! Turns a validated [`GatewayConfig`] into concrete handlers: the verifier
//! backend it names, the file audit writer and the bound RADIUS socket.
//! Every handler receives its configuration through its constructor.

use crate::gateway::Gateway;
use crate::pipeline::AuthPipeline;
use radgate_core::{
    AuditEffects, AuditEncoder, CredentialVerifier, GatewayConfig, Result, TimeEffects,
    VerifierConfig,
};
use radgate_effects::{
    load_directory, DirectoryVerifier, FileAuditHandler, RealTimeHandler, RemoteVerifier,
};
use radgate_radius::RadiusServer;
use std::sync::Arc;

/// Builder for a [`Gateway`]
pub struct GatewayBuilder {
    config: GatewayConfig,
    verifier: Option<Arc<dyn CredentialVerifier>>,
    time: Option<Arc<dyn TimeEffects>>,
}

impl GatewayBuilder {
    /// Start from a validated configuration
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            verifier: None,
            time: None,
        }
    }

    /// Use `verifier` instead of the backend named in the configuration
    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Use `time` for audit timestamps instead of the system clock
    pub fn with_time(mut self, time: Arc<dyn TimeEffects>) -> Self {
        self.time = Some(time);
        self
    }

    /// Create handlers, open the audit log and bind the listening socket
    pub async fn build(self) -> Result<Gateway> {
        let config = self.config;
        if config.default_secret {
            tracing::warn!("No shared_secret configured; using the built-in default");
        }

        let verifier = match self.verifier {
            Some(verifier) => verifier,
            None => build_verifier(&config.verifier).await?,
        };
        let time = self.time.unwrap_or_else(|| Arc::new(RealTimeHandler::new()));

        let audit = Arc::new(
            FileAuditHandler::open(
                &config.audit.log_path,
                config.audit.queue_capacity,
                time,
            )
            .await?,
        );
        let sink: Arc<dyn AuditEffects> = audit.clone();
        let pipeline = Arc::new(AuthPipeline::new(
            verifier,
            sink,
            AuditEncoder::new(config.audit.qualifier_field),
        ));

        let server =
            match RadiusServer::bind(config.listen_addr, config.shared_secret, pipeline.clone())
                .await
            {
                Ok(server) => server,
                Err(e) => {
                    audit.shutdown().await;
                    return Err(e);
                }
            };

        tracing::info!(
            listen = %config.listen_addr,
            backend = pipeline.backend_name(),
            audit_log = %audit.path().display(),
            "Gateway assembled"
        );
        Ok(Gateway::new(server, audit))
    }
}

/// Construct the verifier backend named by `config`
pub async fn build_verifier(config: &VerifierConfig) -> Result<Arc<dyn CredentialVerifier>> {
    match config {
        VerifierConfig::Remote { url, timeout } => {
            let verifier = RemoteVerifier::new(url.clone(), *timeout)?;
            tracing::info!(endpoint = %url, timeout_ms = timeout.as_millis() as u64, "Using remote verifier");
            Ok(Arc::new(verifier))
        }
        VerifierConfig::Directory { path } => {
            let verifier = DirectoryVerifier::new(load_directory(path).await?);
            tracing::info!(path = %path.display(), users = verifier.len(), "Using directory verifier");
            Ok(Arc::new(verifier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radgate_testkit::{sample_directory_file, FixedClock};
    use std::path::PathBuf;
    use std::time::Duration;

    #[tokio::test]
    async fn builds_directory_backend_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");
        tokio::fs::write(&path, sample_directory_file()).await.unwrap();

        let verifier = build_verifier(&VerifierConfig::Directory { path }).await.unwrap();
        assert_eq!(verifier.backend_name(), "directory");
        assert!(verifier
            .verify("alice@example.com", "secret1")
            .await
            .is_accepted());
    }

    #[tokio::test]
    async fn missing_directory_file_is_config_error() {
        let config = VerifierConfig::Directory {
            path: PathBuf::from("/nonexistent/radgate/users.txt"),
        };
        let err = build_verifier(&config).await.err().unwrap();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn builds_remote_backend() {
        let config = VerifierConfig::Remote {
            url: "http://127.0.0.1:9/api/auth/login".into(),
            timeout: Duration::from_millis(100),
        };
        let verifier = build_verifier(&config).await.unwrap();
        assert_eq!(verifier.backend_name(), "remote");
    }

    #[tokio::test]
    async fn unopenable_audit_log_fails_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!(
            "server_ip=127.0.0.1\nserver_port=0\nverifier_url=http://127.0.0.1:9/\naudit_log={}\n",
            dir.path().join("missing").join("log.txt").display()
        );
        let config = GatewayConfig::parse(&text).unwrap();
        let result = GatewayBuilder::new(config)
            .with_time(Arc::new(FixedClock::default()))
            .build()
            .await;
        assert!(result.is_err());
    }
}
