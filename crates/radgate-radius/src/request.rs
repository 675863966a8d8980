//! Access-Request extraction

use crate::auth::decrypt_user_password;
use crate::packet::{Code, Packet, AUTHENTICATOR_LEN, USER_NAME, USER_PASSWORD};
use radgate_core::{AuthRequest, GateError, Result, SharedSecret};
use std::net::SocketAddr;

/// Access-Request decoded into the pipeline's plaintext form
#[derive(Debug, Clone)]
pub struct AccessRequest {
    /// Client that sent the packet
    pub peer: SocketAddr,
    /// Packet identifier, echoed in the response
    pub identifier: u8,
    /// Request Authenticator, needed to sign the response
    pub authenticator: [u8; AUTHENTICATOR_LEN],
    /// Identity and credential
    pub auth: AuthRequest,
}

impl AccessRequest {
    /// Extract User-Name and User-Password from an Access-Request.
    ///
    /// Missing attributes become empty strings. Both values are trimmed.
    pub fn from_packet(packet: &Packet, peer: SocketAddr, secret: &SharedSecret) -> Result<Self> {
        if packet.code != Code::AccessRequest {
            return Err(GateError::protocol(format!(
                "expected Access-Request, got {:?}",
                packet.code
            )));
        }

        let identity = packet
            .attribute(USER_NAME)
            .map(|raw| String::from_utf8_lossy(raw).trim().to_string())
            .unwrap_or_default();

        let credential = match packet.attribute(USER_PASSWORD) {
            Some(hidden) => {
                let plain = decrypt_user_password(secret, &packet.authenticator, hidden)?;
                String::from_utf8_lossy(&plain).trim().to_string()
            }
            None => String::new(),
        };

        Ok(Self {
            peer,
            identifier: packet.identifier,
            authenticator: packet.authenticator,
            auth: AuthRequest::new(identity, credential),
        })
    }
}
