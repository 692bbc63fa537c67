//! Errors - エラー型と分類
//!
//! - DecodeError: メッセージ本文が不正（ループ内で回収、メッセージは破棄）
//! - StoreError: 保存失敗（ループ内で回収、リトライなし）
//! - TransportError: キュー操作の失敗（ループを止める）

use thiserror::Error;

/// The body could not be turned into a `ResultRecord`.
///
/// Malformed JSON, missing fields and type mismatches all end up here; the
/// reason is kept only for the log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid result payload: {reason}")]
pub struct DecodeError {
    pub reason: String,
}

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Persistence failure reported by a `RecordStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached (pool exhausted, connection refused, ...).
    #[error("{0}")]
    Unavailable(String),

    /// The store was reached but refused the record.
    #[error("{0}")]
    Rejected(String),
}

/// Failure of the queue transport itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("receive failed: {0}")]
    Receive(String),

    #[error("delete failed for message_id={id}: {reason}")]
    Delete { id: String, reason: String },

    #[error("queue setup failed: {0}")]
    Setup(String),
}

/// Reasons the worker stops with an error.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("worker task aborted: {0}")]
    Join(String),
}
