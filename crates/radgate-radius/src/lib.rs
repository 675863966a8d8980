//! RADIUS transport for radgate
//!
//! Implements the slice of RFC 2865 the gateway needs: decoding
//! Access-Requests, recovering the hidden User-Password, and answering with
//! Access-Accept or Access-Reject carrying a valid Response Authenticator.
//! The server hands each decoded request to an [`AccessRequestHandler`] and
//! knows nothing about how decisions are made.

pub mod auth;
pub mod client;
pub mod packet;
pub mod request;
pub mod server;

pub use auth::{decrypt_user_password, encode_response, encrypt_user_password, verify_response};
pub use client::{ClientConfig, RadiusClient};
pub use packet::{Attribute, Code, Packet};
pub use request::AccessRequest;
pub use server::{AccessRequestHandler, RadiusServer};
