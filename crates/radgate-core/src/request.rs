//! Decoded authentication request handed to the pipeline

use std::fmt;

/// Identity and plaintext credential of one inbound request
///
/// Owned by a single pipeline invocation and dropped when it completes. The
/// credential is excluded from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthRequest {
    identity: String,
    credential: String,
}

impl AuthRequest {
    /// Build a request from decoded transport attributes
    pub fn new(identity: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            credential: credential.into(),
        }
    }

    /// Raw identity as submitted
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Plaintext credential
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("identity", &self.identity)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// Username/password pair of the static user directory
#[derive(Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Full identity the entry matches (qualifier included)
    pub username: String,
    /// Expected credential
    pub password: String,
}

impl DirectoryEntry {
    /// Create an entry
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryEntry")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let request = AuthRequest::new("alice@example.com", "secret1");
        let rendered = format!("{request:?}");
        assert!(rendered.contains("alice@example.com"));
        assert!(!rendered.contains("secret1"));

        let entry = DirectoryEntry::new("alice@example.com", "secret1");
        assert!(!format!("{entry:?}").contains("secret1"));
    }
}
