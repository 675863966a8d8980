//! Remote identity endpoint verifier
//!
//! POSTs `{"userName": .., "password": ..}` to a login endpoint. A 2xx
//! status accepts, any other status rejects, and a transport failure
//! (unreachable, timeout) reports the backend as unavailable.

use async_trait::async_trait;
use radgate_core::{CredentialVerifier, GateError, Result, VerificationOutcome};
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "userName")]
    user_name: &'a str,
    password: &'a str,
}

/// Verifier delegating to an external HTTP identity service
#[derive(Debug, Clone)]
pub struct RemoteVerifier {
    endpoint: String,
    client: reqwest::Client,
}

impl RemoteVerifier {
    /// Create a verifier for `endpoint` with a per-call `timeout`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GateError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl CredentialVerifier for RemoteVerifier {
    async fn verify(&self, username: &str, credential: &str) -> VerificationOutcome {
        let body = LoginRequest {
            user_name: username,
            password: credential,
        };

        match self.client.post(&self.endpoint).json(&body).send().await {
            Ok(response) if response.status().is_success() => VerificationOutcome::Accepted,
            Ok(response) => {
                tracing::debug!(
                    identity = %username,
                    status = %response.status(),
                    "Identity endpoint refused credentials"
                );
                VerificationOutcome::Rejected
            }
            Err(e) => {
                tracing::warn!(
                    identity = %username,
                    endpoint = %self.endpoint,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Identity endpoint unavailable"
                );
                VerificationOutcome::Unavailable
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
