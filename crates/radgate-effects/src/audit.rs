//! Append-only audit log handler
//!
//! One long-lived writer task owns the log file and the clock. Requests
//! hand it serialized records over a bounded queue and wait for the write
//! acknowledgement, so every line is written whole, in queue order and
//! timestamped in that order, no matter how many requests are in flight.
//! A failed write is cut back to the previous end of the file.
//!
//! ## Lock Usage
//!
//! Uses `parking_lot::Mutex` for the queue sender and the writer handle:
//! access is a brief clone or take, never held across an await.

use async_trait::async_trait;
use parking_lot::Mutex;
use radgate_core::audit::format_audit_line;
use radgate_core::{AuditEffects, AuditRecord, GateError, Result, TimeEffects};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Target of the diagnostic mirror of each audit record
pub const AUDIT_TRACING_TARGET: &str = "radgate::audit";

struct AppendLine {
    serialized: String,
    ack: oneshot::Sender<Result<()>>,
}

/// Append-only file the writer task can roll back
#[async_trait]
trait LogFile: AsyncWrite + Unpin + Send {
    /// Current length in bytes
    async fn end_offset(&mut self) -> io::Result<u64>;

    /// Cut the file back to `len` bytes
    async fn truncate_to(&mut self, len: u64) -> io::Result<()>;

    /// Flush file contents to stable storage
    async fn sync(&mut self) -> io::Result<()>;
}

#[async_trait]
impl LogFile for File {
    async fn end_offset(&mut self) -> io::Result<u64> {
        Ok(self.metadata().await?.len())
    }

    async fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len).await
    }

    async fn sync(&mut self) -> io::Result<()> {
        self.sync_all().await
    }
}

/// Audit handler writing `<timestamp>\t<json>` lines to a file
pub struct FileAuditHandler {
    path: PathBuf,
    queue: Mutex<Option<mpsc::Sender<AppendLine>>>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl FileAuditHandler {
    /// Open (creating if absent) the log at `path` and start the writer task
    pub async fn open(
        path: impl AsRef<Path>,
        queue_capacity: usize,
        time: Arc<dyn TimeEffects>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await
            .map_err(|e| {
                GateError::storage(format!("Failed to open audit log {}: {e}", path.display()))
            })?;

        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let writer = tokio::spawn(run_writer(file, rx, time));

        tracing::info!(path = %path.display(), "Audit log opened");
        Ok(Self {
            path,
            queue: Mutex::new(Some(tx)),
            writer: Mutex::new(Some(writer)),
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop accepting records, then wait until every queued line is on disk
    pub async fn shutdown(&self) {
        drop(self.queue.lock().take());
        let writer = self.writer.lock().take();
        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                tracing::error!(error = %e, "Audit writer task failed");
            }
        }
    }
}

#[async_trait]
impl AuditEffects for FileAuditHandler {
    async fn append(&self, record: AuditRecord) -> Result<()> {
        let serialized = record.to_json()?;
        tracing::info!(target: AUDIT_TRACING_TARGET, "{serialized}");

        let queue = self
            .queue
            .lock()
            .clone()
            .ok_or_else(|| GateError::storage("audit log is closed"))?;

        let (ack, done) = oneshot::channel();
        queue
            .send(AppendLine { serialized, ack })
            .await
            .map_err(|_| GateError::storage("audit writer stopped"))?;
        done.await
            .map_err(|_| GateError::storage("audit writer dropped the record"))?
    }
}

async fn run_writer<F: LogFile>(
    mut file: F,
    mut rx: mpsc::Receiver<AppendLine>,
    time: Arc<dyn TimeEffects>,
) {
    while let Some(AppendLine { serialized, ack }) = rx.recv().await {
        let line = format_audit_line(&time.local_now(), &serialized);
        let result = write_line(&mut file, &line).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to append audit line");
        }
        let _ = ack.send(result);
    }

    if let Err(e) = file.sync().await {
        tracing::warn!(error = %e, "Failed to sync audit log on close");
    }
    tracing::debug!("Audit writer stopped");
}

async fn write_line<F: LogFile>(file: &mut F, line: &str) -> Result<()> {
    let offset = file
        .end_offset()
        .await
        .map_err(|e| GateError::storage(format!("audit log length unavailable: {e}")))?;

    let written = async {
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        if let Err(rollback) = file.truncate_to(offset).await {
            tracing::error!(error = %rollback, offset, "Failed to cut back partial audit line");
        }
        return Err(GateError::storage(format!("audit write failed: {e}")));
    }
    Ok(())
}
