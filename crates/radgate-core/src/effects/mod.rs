//! Layer 1: Core Effect Trait Definitions
//!
//! Pure trait definitions for the side effects of the request pipeline.
//! This module defines **what** effects can be performed; handlers in
//! `radgate-effects` define **how**, and `radgate-testkit` provides
//! deterministic doubles.
//!
//! - **Verifier**: decide whether an (identity, credential) pair is genuine
//! - **Audit**: persist a redacted audit record
//! - **Time**: local wall-clock time for audit timestamps

pub mod audit;
pub mod time;
pub mod verifier;

pub use audit::AuditEffects;
pub use time::TimeEffects;
pub use verifier::CredentialVerifier;
