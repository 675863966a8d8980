//! Mock effect handlers

use async_trait::async_trait;
use parking_lot::Mutex;
use radgate_core::{
    AuditEffects, AuditRecord, CredentialVerifier, GateError, Result, VerificationOutcome,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Arguments of one `verify` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCall {
    /// Username passed to the verifier
    pub username: String,
    /// Credential passed to the verifier
    pub credential: String,
}

/// Scripted verifier recording every call
#[derive(Debug, Clone)]
pub struct MockVerifier {
    default: VerificationOutcome,
    scripted: Arc<HashMap<(String, String), VerificationOutcome>>,
    calls: Arc<Mutex<Vec<VerifyCall>>>,
}

impl MockVerifier {
    /// Verifier answering `outcome` to everything
    pub fn always(outcome: VerificationOutcome) -> Self {
        Self {
            default: outcome,
            scripted: Arc::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Verifier accepting only the given pairs
    pub fn accepting(pairs: &[(&str, &str)]) -> Self {
        let scripted = pairs
            .iter()
            .map(|(u, c)| ((u.to_string(), c.to_string()), VerificationOutcome::Accepted))
            .collect();
        Self {
            default: VerificationOutcome::Rejected,
            scripted: Arc::new(scripted),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Calls seen so far
    pub fn calls(&self) -> Vec<VerifyCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CredentialVerifier for MockVerifier {
    async fn verify(&self, username: &str, credential: &str) -> VerificationOutcome {
        self.calls.lock().push(VerifyCall {
            username: username.to_string(),
            credential: credential.to_string(),
        });
        self.scripted
            .get(&(username.to_string(), credential.to_string()))
            .copied()
            .unwrap_or(self.default)
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

/// Audit sink keeping records in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    records: Arc<Mutex<Vec<AuditRecord>>>,
    failure: Arc<Mutex<Option<GateError>>>,
}

impl MemoryAuditSink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following append fail with `error`
    pub fn fail_with(&self, error: GateError) {
        *self.failure.lock() = Some(error);
    }

    /// Records appended so far
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    /// Most recent record
    pub fn last(&self) -> Option<AuditRecord> {
        self.records.lock().last().cloned()
    }
}

#[async_trait]
impl AuditEffects for MemoryAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<()> {
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        record.to_json()?;
        self.records.lock().push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radgate_core::{AuditEncoder, Decision};

    #[tokio::test]
    async fn mock_verifier_scripts_and_records() {
        let verifier = MockVerifier::accepting(&[("alice", "pw")]);
        assert_eq!(verifier.verify("alice", "pw").await, VerificationOutcome::Accepted);
        assert_eq!(verifier.verify("alice", "no").await, VerificationOutcome::Rejected);
        assert_eq!(verifier.calls().len(), 2);
        assert_eq!(verifier.calls()[1].credential, "no");
    }

    #[tokio::test]
    async fn memory_sink_can_fail() {
        let sink = MemoryAuditSink::new();
        let record = AuditEncoder::default().encode(Decision::Accept, "a", "", "pw");
        sink.append(record.clone()).await.unwrap();
        sink.fail_with(GateError::storage("disk full"));
        assert!(sink.append(record).await.is_err());
        assert_eq!(sink.records().len(), 1);
    }
}
