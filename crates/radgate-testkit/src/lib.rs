//! radgate Testing Infrastructure
//!
//! Deterministic doubles for the effect traits in `radgate-core` and shared
//! fixtures, so pipeline and handler tests never depend on a live identity
//! service or the wall clock.
//!
//! ```toml
//! [dev-dependencies]
//! radgate-testkit = { path = "../radgate-testkit" }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod logs;
pub mod mocks;
pub mod time;

pub use fixtures::*;
pub use logs::LogCapture;
pub use mocks::{MemoryAuditSink, MockVerifier, VerifyCall};
pub use time::FixedClock;
