//! Audit trail effect

use crate::audit::AuditRecord;
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Durable, append-only destination for audit records
///
/// Appends from concurrent requests must land as whole lines, never
/// interleaved. Ownership of the record passes to the sink.
#[async_trait]
pub trait AuditEffects: Send + Sync {
    /// Append one record, timestamped, and mirror it to the diagnostic stream
    async fn append(&self, record: AuditRecord) -> Result<()>;
}

#[async_trait]
impl<T: AuditEffects + ?Sized> AuditEffects for Arc<T> {
    async fn append(&self, record: AuditRecord) -> Result<()> {
        (**self).append(record).await
    }
}
