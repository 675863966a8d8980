//! Authentication request pipeline
//!
//! parse -> verify -> map -> encode -> append, once per request. The pipeline
//! holds only shared, immutable handles, so a single instance serves every
//! concurrent request and no call depends on another.

use async_trait::async_trait;
use radgate_core::{
    parse_identity, AuditEffects, AuditEncoder, AuditStatus, AuthRequest, CredentialVerifier,
    Decision, Result,
};
use radgate_radius::{AccessRequest, AccessRequestHandler};
use std::sync::Arc;

/// Orchestrates one authentication decision and its audit record
#[derive(Clone)]
pub struct AuthPipeline {
    verifier: Arc<dyn CredentialVerifier>,
    audit: Arc<dyn AuditEffects>,
    encoder: AuditEncoder,
}

impl AuthPipeline {
    /// Compose a pipeline from its verifier, audit sink and encoder
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        audit: Arc<dyn AuditEffects>,
        encoder: AuditEncoder,
    ) -> Self {
        Self {
            verifier,
            audit,
            encoder,
        }
    }

    /// Name of the configured verifier backend
    pub fn backend_name(&self) -> &'static str {
        self.verifier.backend_name()
    }

    /// Decide one request and record it.
    ///
    /// The verifier sees the whole trimmed identity, qualifier included; the
    /// audit record carries the split form. Fails only when the audit record
    /// cannot be serialized or stored.
    pub async fn handle(&self, identity: &str, credential: &str) -> Result<Decision> {
        let identity = identity.trim();
        let parsed = parse_identity(identity);

        let outcome = self.verifier.verify(identity, credential).await;
        let status = AuditStatus::from_outcome(outcome);
        let decision = Decision::from(outcome);

        let record =
            self.encoder
                .encode(status, &parsed.local_id, &parsed.org_qualifier, credential);
        self.audit.append(record).await?;

        tracing::info!(
            identity,
            backend = self.verifier.backend_name(),
            status = %status,
            decision = %decision,
            "Request decided"
        );
        Ok(decision)
    }

    /// [`handle`](Self::handle) for a decoded request
    pub async fn handle_request(&self, request: &AuthRequest) -> Result<Decision> {
        self.handle(request.identity(), request.credential()).await
    }
}

#[async_trait]
impl AccessRequestHandler for AuthPipeline {
    async fn handle_access_request(&self, request: AccessRequest) -> Decision {
        match self.handle_request(&request.auth).await {
            Ok(decision) => decision,
            Err(e) => {
                tracing::error!(
                    peer = %request.peer,
                    identity = request.auth.identity(),
                    error = %e,
                    "Request pipeline failed; rejecting"
                );
                Decision::Reject
            }
        }
    }
}
