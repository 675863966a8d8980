//! radgate Effects
//!
//! Layer 3: production handlers for the effect traits defined in
//! `radgate-core`. Each handler bridges a pure interface to the network, the
//! filesystem or the system clock. Test doubles live in `radgate-testkit`.

pub mod audit;
pub mod configuration;
pub mod time;
pub mod verifier;

pub use audit::{FileAuditHandler, AUDIT_TRACING_TARGET};
pub use configuration::{load_directory, load_gateway_config};
pub use time::RealTimeHandler;
pub use verifier::{DirectoryVerifier, RemoteVerifier};
