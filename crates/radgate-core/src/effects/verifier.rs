//! Credential verification effect
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `radgate-effects` (remote endpoint, static directory)
//! - **Usage**: the request pipeline in `radgate-agent`

use crate::decision::VerificationOutcome;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability deciding whether a credential is genuine for an identity
///
/// Implementations hold only immutable state and cache nothing, so one
/// instance serves every concurrent request.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check `credential` for the full (trimmed, qualified) `username`
    async fn verify(&self, username: &str, credential: &str) -> VerificationOutcome;

    /// Short backend name for diagnostics
    fn backend_name(&self) -> &'static str;
}

#[async_trait]
impl<T: CredentialVerifier + ?Sized> CredentialVerifier for Arc<T> {
    async fn verify(&self, username: &str, credential: &str) -> VerificationOutcome {
        (**self).verify(username, credential).await
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
