//! Gateway runtime
//!
//! Runs the RADIUS server over the pipeline and owns shutdown ordering:
//! stop receiving, let in-flight requests finish, then drain and close the
//! audit writer so every decided request has its line on disk.

use crate::pipeline::AuthPipeline;
use radgate_core::{GateError, Result};
use radgate_effects::FileAuditHandler;
use radgate_radius::RadiusServer;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Assembled gateway, bound and ready to serve
pub struct Gateway {
    server: RadiusServer<AuthPipeline>,
    audit: Arc<FileAuditHandler>,
}

impl Gateway {
    pub(crate) fn new(server: RadiusServer<AuthPipeline>, audit: Arc<FileAuditHandler>) -> Self {
        Self { server, audit }
    }

    /// Address the RADIUS socket is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.server.local_addr()
    }

    /// Serve until `shutdown` resolves, then drain the audit writer
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let served = self.server.serve_until(shutdown).await;
        self.audit.shutdown().await;
        tracing::info!("Gateway stopped");
        served
    }

    /// Serve on a background task
    pub fn spawn(self) -> Result<GatewayHandle> {
        let local_addr = self.local_addr()?;
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(self.run_until(async move {
            let _ = stopped.await;
        }));
        Ok(GatewayHandle {
            local_addr,
            stop,
            task,
        })
    }
}

/// Handle to a gateway serving on a background task
pub struct GatewayHandle {
    local_addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<()>>,
}

impl GatewayHandle {
    /// Address the RADIUS socket is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the gateway and wait until the audit log is flushed
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.stop.send(());
        self.task
            .await
            .map_err(|e| GateError::internal(format!("gateway task failed: {e}")))?
    }
}
