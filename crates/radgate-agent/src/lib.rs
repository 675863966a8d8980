//! # radgate Agent - Layer 4: Runtime Composition
//!
//! Wires the pure pipeline from `radgate-core`, the handlers from
//! `radgate-effects` and the RADIUS transport into a running gateway.
//!
//! ## Key Components
//!
//! - **AuthPipeline**: parse, verify, map, encode and audit one request
//! - **GatewayBuilder**: build handlers from a [`GatewayConfig`](radgate_core::GatewayConfig)
//! - **Gateway**: serve requests and shut down with the audit log drained
//!
//! ## Usage
//!
//! ```rust,ignore
//! use radgate_agent::GatewayBuilder;
//!
//! let config = radgate_effects::load_gateway_config("config.ini").await?;
//! let gateway = GatewayBuilder::new(config).build().await?;
//! gateway.run_until(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! ```

pub mod builder;
pub mod gateway;
pub mod pipeline;

pub use builder::{build_verifier, GatewayBuilder};
pub use gateway::{Gateway, GatewayHandle};
pub use pipeline::AuthPipeline;
