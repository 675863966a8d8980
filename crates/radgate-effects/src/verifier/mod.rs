//! Credential verifier handlers
//!
//! Two interchangeable implementations of
//! [`CredentialVerifier`](radgate_core::CredentialVerifier), selected by the
//! `verifier` configuration key.

mod directory;
mod remote;

pub use directory::DirectoryVerifier;
pub use remote::RemoteVerifier;
