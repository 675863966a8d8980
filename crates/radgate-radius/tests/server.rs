//! RADIUS server exchange tests over a loopback socket

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use radgate_core::{Decision, SharedSecret};
use radgate_radius::packet::{AUTHENTICATOR_LEN, USER_NAME, USER_PASSWORD};
use radgate_radius::{
    encrypt_user_password, AccessRequest, AccessRequestHandler, ClientConfig, Code, Packet,
    RadiusClient, RadiusServer,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::{oneshot, Notify};

const SECRET: &str = "testing123";

/// Accepts `alice@example.com` / `secret1`; optionally holds every request
#[derive(Default)]
struct StaticHandler {
    calls: AtomicUsize,
    release: Option<Arc<Notify>>,
}

#[async_trait]
impl AccessRequestHandler for StaticHandler {
    async fn handle_access_request(&self, request: AccessRequest) -> Decision {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(release) = &self.release {
            release.notified().await;
        }
        let ok = request.auth.identity() == "alice@example.com"
            && request.auth.credential() == "secret1";
        radgate_core::map_decision(ok)
    }
}

async fn start(handler: Arc<StaticHandler>) -> (SocketAddr, oneshot::Sender<()>) {
    let server = RadiusServer::bind(
        "127.0.0.1:0".parse().unwrap(),
        SharedSecret::new(SECRET),
        handler,
    )
    .await
    .unwrap();
    let addr = server.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    tokio::spawn(server.serve_until(async move {
        let _ = stopped.await;
    }));
    (addr, stop)
}

fn client(server: SocketAddr) -> RadiusClient {
    RadiusClient::new(ClientConfig {
        server,
        secret: SharedSecret::new(SECRET),
        timeout: Duration::from_secs(2),
    })
}

#[tokio::test]
async fn accept_and_reject_round_trip() {
    let handler = Arc::new(StaticHandler::default());
    let (addr, _stop) = start(handler.clone()).await;
    let client = client(addr);

    assert_eq!(
        client.authenticate("alice@example.com", "secret1").await.unwrap(),
        Decision::Accept
    );
    assert_eq!(
        client.authenticate("alice@example.com", "wrong").await.unwrap(),
        Decision::Reject
    );
    assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn wrong_secret_fails_response_check() {
    let (addr, _stop) = start(Arc::new(StaticHandler::default())).await;
    let client = RadiusClient::new(ClientConfig {
        server: addr,
        secret: SharedSecret::new("not-the-secret"),
        timeout: Duration::from_secs(2),
    });

    assert!(client.authenticate("alice@example.com", "secret1").await.is_err());
}

#[tokio::test]
async fn malformed_and_unsupported_packets_are_dropped() {
    let handler = Arc::new(StaticHandler::default());
    let (addr, _stop) = start(handler.clone()).await;

    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(&[1, 2, 3], addr).await.unwrap();
    let accounting = Packet::new(Code::AccountingRequest, 5, [0; AUTHENTICATOR_LEN])
        .encode()
        .unwrap();
    socket.send_to(&accounting, addr).await.unwrap();

    let mut buffer = [0u8; 64];
    let nothing = tokio::time::timeout(Duration::from_millis(200), socket.recv_from(&mut buffer)).await;
    assert!(nothing.is_err(), "server must not answer invalid packets");

    assert_eq!(
        client(addr).authenticate("alice@example.com", "secret1").await.unwrap(),
        Decision::Accept
    );
    assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retransmission_of_in_flight_request_is_dropped() {
    let release = Arc::new(Notify::new());
    let handler = Arc::new(StaticHandler {
        calls: AtomicUsize::new(0),
        release: Some(release.clone()),
    });
    let (addr, _stop) = start(handler.clone()).await;

    let secret = SharedSecret::new(SECRET);
    let authenticator = [9u8; AUTHENTICATOR_LEN];
    let request = Packet::new(Code::AccessRequest, 77, authenticator)
        .with_attribute(USER_NAME, "alice@example.com")
        .with_attribute(
            USER_PASSWORD,
            encrypt_user_password(&secret, &authenticator, b"secret1").unwrap(),
        )
        .encode()
        .unwrap();

    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(&request, addr).await.unwrap();
    socket.send_to(&request, addr).await.unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    release.notify_waiters();

    let mut buffer = [0u8; 64];
    let (len, _) = tokio::time::timeout(Duration::from_secs(2), socket.recv_from(&mut buffer))
        .await
        .unwrap()
        .unwrap();
    let response = Packet::decode(&buffer[..len]).unwrap();
    assert_eq!(response.code, Code::AccessAccept);
    assert_eq!(response.identifier, 77);
    assert!(radgate_radius::verify_response(&response, &authenticator, &secret).unwrap());
}

#[tokio::test]
async fn immediate_shutdown_returns_cleanly() {
    let handler = Arc::new(StaticHandler::default());
    let server = RadiusServer::bind(
        "127.0.0.1:0".parse().unwrap(),
        SharedSecret::new(SECRET),
        handler,
    )
    .await
    .unwrap();

    let result = server.serve_until(async {}).await;
    assert!(result.is_ok());
}
