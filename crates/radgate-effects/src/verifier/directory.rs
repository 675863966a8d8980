//! Static user directory verifier

use async_trait::async_trait;
use radgate_core::{CredentialVerifier, DirectoryEntry, VerificationOutcome};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Verifier matching against a fixed, in-memory list of users
///
/// The list is immutable after construction and shared by reference, so
/// concurrent requests read it without locking.
#[derive(Debug, Clone)]
pub struct DirectoryVerifier {
    entries: Arc<[DirectoryEntry]>,
}

impl DirectoryVerifier {
    /// Create a verifier over `entries`
    pub fn new(entries: impl Into<Arc<[DirectoryEntry]>>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Number of directory entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for DirectoryVerifier {
    async fn verify(&self, username: &str, credential: &str) -> VerificationOutcome {
        let matched = self.entries.iter().any(|entry| {
            entry.username == username
                && bool::from(entry.password.as_bytes().ct_eq(credential.as_bytes()))
        });
        VerificationOutcome::from(matched)
    }

    fn backend_name(&self) -> &'static str {
        "directory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> DirectoryVerifier {
        DirectoryVerifier::new(vec![
            DirectoryEntry::new("alice@example.com", "secret1"),
            DirectoryEntry::new("bob", "hunter2"),
            DirectoryEntry::new("bob", "second"),
        ])
    }

    #[tokio::test]
    async fn exact_pair_accepts() {
        let verifier = directory();
        assert_eq!(
            verifier.verify("alice@example.com", "secret1").await,
            VerificationOutcome::Accepted
        );
        assert_eq!(verifier.verify("bob", "second").await, VerificationOutcome::Accepted);
    }

    #[tokio::test]
    async fn near_misses_reject() {
        let verifier = directory();
        for (user, pass) in [
            ("alice", "secret1"),
            ("Alice@example.com", "secret1"),
            ("alice@example.com", "Secret1"),
            ("alice@example.com", "secret"),
            ("alice@example.com", "secret11"),
            ("bob", "secret1"),
            ("", ""),
        ] {
            assert_eq!(
                verifier.verify(user, pass).await,
                VerificationOutcome::Rejected,
                "{user}/{pass}"
            );
        }
    }

    #[tokio::test]
    async fn empty_directory_rejects_everything() {
        let verifier = DirectoryVerifier::new(Vec::new());
        assert!(verifier.is_empty());
        assert_eq!(verifier.verify("", "").await, VerificationOutcome::Rejected);
    }
}
