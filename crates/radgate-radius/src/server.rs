//! UDP RADIUS server
//!
//! Receives Access-Requests on a single socket and runs one task per
//! request. Invalid packets are dropped silently (RFC 2865 section 3), and a
//! retransmission of a request that is still being processed is dropped too.

use crate::auth::encode_response;
use crate::packet::{Code, Packet, AUTHENTICATOR_LEN, MAX_PACKET_LEN};
use crate::request::AccessRequest;
use async_trait::async_trait;
use parking_lot::Mutex;
use radgate_core::{Decision, GateError, Result, SharedSecret};
use std::collections::HashSet;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;

/// Decides Access-Requests on behalf of the server
#[async_trait]
pub trait AccessRequestHandler: Send + Sync + 'static {
    /// Produce the decision for one request; never fails
    async fn handle_access_request(&self, request: AccessRequest) -> Decision;
}

type InFlight = Arc<Mutex<HashSet<(SocketAddr, u8)>>>;

/// Removes an in-flight key when the request task ends, even on panic
struct InFlightGuard {
    key: (SocketAddr, u8),
    in_flight: InFlight,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}

/// RADIUS authentication server bound to a UDP socket
pub struct RadiusServer<H> {
    socket: Arc<UdpSocket>,
    secret: Arc<SharedSecret>,
    handler: Arc<H>,
    in_flight: InFlight,
}

impl<H: AccessRequestHandler> RadiusServer<H> {
    /// Bind the listening socket
    pub async fn bind(addr: SocketAddr, secret: SharedSecret, handler: Arc<H>) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| GateError::network(format!("Failed to bind {addr}: {e}")))?;

        Ok(Self {
            socket: Arc::new(socket),
            secret: Arc::new(secret),
            handler,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket
            .local_addr()
            .map_err(|e| GateError::network(format!("Failed to get local address: {e}")))
    }

    /// Serve requests until `shutdown` resolves, then wait for in-flight requests
    pub async fn serve_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);
        let mut tasks = JoinSet::new();
        let mut buffer = vec![0u8; MAX_PACKET_LEN];

        tracing::info!(addr = ?self.socket.local_addr().ok(), "RADIUS server listening");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                received = self.socket.recv_from(&mut buffer) => {
                    let (len, peer) = match received {
                        Ok(received) => received,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to receive datagram");
                            continue;
                        }
                    };

                    if let Some((request, guard)) = self.admit(&buffer[..len], peer) {
                        let socket = self.socket.clone();
                        let secret = self.secret.clone();
                        let handler = self.handler.clone();
                        tasks.spawn(async move {
                            let _guard = guard;
                            respond(&socket, &secret, handler.as_ref(), request).await;
                        });
                    }
                }
            }

            while let Some(finished) = tasks.try_join_next() {
                if let Err(e) = finished {
                    tracing::error!(error = %e, "Request task failed");
                }
            }
        }

        tracing::info!(in_flight = tasks.len(), "RADIUS server stopping");
        while let Some(finished) = tasks.join_next().await {
            if let Err(e) = finished {
                tracing::error!(error = %e, "Request task failed");
            }
        }
        Ok(())
    }

    fn admit(&self, datagram: &[u8], peer: SocketAddr) -> Option<(AccessRequest, InFlightGuard)> {
        let packet = match Packet::decode(datagram) {
            Ok(packet) => packet,
            Err(e) => {
                tracing::debug!(peer = %peer, error = %e, "Dropping malformed packet");
                return None;
            }
        };

        if packet.code != Code::AccessRequest {
            tracing::debug!(peer = %peer, code = ?packet.code, "Dropping unsupported packet");
            return None;
        }

        let request = match AccessRequest::from_packet(&packet, peer, &self.secret) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(peer = %peer, error = %e, "Dropping undecodable Access-Request");
                return None;
            }
        };

        let key = (peer, request.identifier);
        if !self.in_flight.lock().insert(key) {
            tracing::debug!(
                peer = %peer,
                identifier = request.identifier,
                "Dropping retransmission of in-flight request"
            );
            return None;
        }

        let guard = InFlightGuard {
            key,
            in_flight: self.in_flight.clone(),
        };
        Some((request, guard))
    }
}

async fn respond<H: AccessRequestHandler + ?Sized>(
    socket: &UdpSocket,
    secret: &SharedSecret,
    handler: &H,
    request: AccessRequest,
) {
    let peer = request.peer;
    let identifier = request.identifier;
    let authenticator: [u8; AUTHENTICATOR_LEN] = request.authenticator;

    let decision = handler.handle_access_request(request).await;
    let response = Packet::new(Code::from(decision), identifier, [0; AUTHENTICATOR_LEN]);

    let wire = match encode_response(&response, &authenticator, secret) {
        Ok(wire) => wire,
        Err(e) => {
            tracing::error!(peer = %peer, error = %e, "Failed to encode response");
            return;
        }
    };

    match socket.send_to(&wire, peer).await {
        Ok(_) => tracing::debug!(peer = %peer, identifier, decision = %decision, "Response sent"),
        Err(e) => tracing::warn!(peer = %peer, error = %e, "Failed to send response"),
    }
}
