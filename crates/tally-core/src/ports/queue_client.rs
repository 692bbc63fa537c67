//! QueueClient port - メッセージの受信と削除

use async_trait::async_trait;

use crate::domain::{RawMessage, TransportError};

/// Queue transport as seen by the worker loop.
///
/// Connections are created once at startup and reused for every iteration.
/// Only one loop uses a client, so implementations need to be safe for
/// sequential reuse, not for concurrent callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Name of the queue, used in log lines.
    fn queue_name(&self) -> &str;

    /// Wait for the next message.
    ///
    /// Must be bounded by the transport's poll timeout; returns `Ok(None)`
    /// when nothing arrived in time.
    async fn receive(&self) -> Result<Option<RawMessage>, TransportError>;

    /// Remove a received message from the queue.
    async fn delete(&self, id: &str, receipt: &str) -> Result<(), TransportError>;
}
