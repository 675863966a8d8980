//! radgate Core
//!
//! Layer 1 of the gateway: the types, effect traits and pure logic of the
//! authentication-request pipeline.
//!
//! - [`identity`]: split `user@org` identities
//! - [`decision`]: verification outcomes and protocol decisions
//! - [`audit`]: redacted audit records and the audit log line format
//! - [`config`]: `key=value` configuration parsing
//! - [`effects`]: verifier, audit and time effect traits
//!
//! Nothing in this crate touches the network, the filesystem or the clock.

pub mod audit;
pub mod config;
pub mod decision;
pub mod effects;
pub mod errors;
pub mod identity;
pub mod request;

pub use audit::{
    credential_digest, AuditEncoder, AuditRecord, AuditStatus, QualifierField,
    AUDIT_TIMESTAMP_FORMAT,
};
pub use config::{AuditConfig, GatewayConfig, SharedSecret, VerifierConfig};
pub use decision::{map_decision, Decision, VerificationOutcome};
pub use effects::{AuditEffects, CredentialVerifier, TimeEffects};
pub use errors::{GateError, Result};
pub use identity::{parse_identity, ParsedIdentity};
pub use request::{AuthRequest, DirectoryEntry};
