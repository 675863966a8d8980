//! Minimal Access-Request client
//!
//! Sends one Access-Request and waits for the matching, authenticated
//! response. Used for probing a running gateway.

use crate::auth::{encrypt_user_password, verify_response};
use crate::packet::{Code, Packet, AUTHENTICATOR_LEN, MAX_PACKET_LEN, USER_NAME, USER_PASSWORD};
use radgate_core::{Decision, GateError, Result, SharedSecret};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway address
    pub server: SocketAddr,
    /// Shared secret
    pub secret: SharedSecret,
    /// How long to wait for the response
    pub timeout: Duration,
}

/// Access-Request client
pub struct RadiusClient {
    config: ClientConfig,
}

impl RadiusClient {
    /// Create a new client with the provided configuration
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Send credentials and return the gateway's decision
    pub async fn authenticate(&self, identity: &str, credential: &str) -> Result<Decision> {
        let identifier: u8 = rand::random();
        let authenticator: [u8; AUTHENTICATOR_LEN] = rand::random();
        self.authenticate_with(identifier, authenticator, identity, credential)
            .await
    }

    /// Send credentials with a caller-chosen identifier and authenticator
    pub async fn authenticate_with(
        &self,
        identifier: u8,
        authenticator: [u8; AUTHENTICATOR_LEN],
        identity: &str,
        credential: &str,
    ) -> Result<Decision> {
        let hidden =
            encrypt_user_password(&self.config.secret, &authenticator, credential.as_bytes())?;
        let request = Packet::new(Code::AccessRequest, identifier, authenticator)
            .with_attribute(USER_NAME, identity.as_bytes())
            .with_attribute(USER_PASSWORD, hidden)
            .encode()?;

        let socket = self.create_local_socket().await?;
        socket
            .send_to(&request, self.config.server)
            .await
            .map_err(|e| GateError::network(format!("Failed to send Access-Request: {e}")))?;

        let response = timeout(
            self.config.timeout,
            self.receive_response(&socket, identifier, &authenticator),
        )
        .await
        .map_err(|_| GateError::network("Access-Request timed out"))??;

        match response.code {
            Code::AccessAccept => Ok(Decision::Accept),
            Code::AccessReject => Ok(Decision::Reject),
            other => Err(GateError::protocol(format!("unexpected response {other:?}"))),
        }
    }

    async fn create_local_socket(&self) -> Result<UdpSocket> {
        let bind_addr: SocketAddr = if self.config.server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| GateError::network(format!("Failed to bind client socket: {e}")))
    }

    async fn receive_response(
        &self,
        socket: &UdpSocket,
        identifier: u8,
        authenticator: &[u8; AUTHENTICATOR_LEN],
    ) -> Result<Packet> {
        let mut buffer = vec![0u8; MAX_PACKET_LEN];
        loop {
            let (len, from) = socket
                .recv_from(&mut buffer)
                .await
                .map_err(|e| GateError::network(format!("Failed to receive response: {e}")))?;

            if from != self.config.server {
                tracing::debug!(from = %from, "Ignoring datagram from unexpected source");
                continue;
            }

            let packet = match Packet::decode(&buffer[..len]) {
                Ok(packet) => packet,
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring malformed response");
                    continue;
                }
            };
            if packet.identifier != identifier {
                tracing::debug!(identifier = packet.identifier, "Ignoring mismatched identifier");
                continue;
            }
            if !verify_response(&packet, authenticator, &self.config.secret)? {
                return Err(GateError::protocol("response authenticator mismatch"));
            }
            return Ok(packet);
        }
    }
}
