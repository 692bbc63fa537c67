//! InMemoryQueueClient - 開発用のキュー
//!
//! # 実装詳細
//! - VecDeque で FIFO を管理、Mutex で排他制御
//! - Notify で push 時に待機中の receive を起こす
//! - receive は poll_timeout まで待って何もなければ None

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;
use ulid::Ulid;

use crate::domain::{RawMessage, TransportError};
use crate::ports::QueueClient;

#[derive(Default)]
struct QueueState {
    ready: VecDeque<RawMessage>,
    /// receipt -> message id, for messages handed out but not deleted yet.
    in_flight: HashMap<String, String>,
    deleted: usize,
}

/// In-process queue with long-poll semantics.
///
/// # 使用例
/// ```ignore
/// let queue = InMemoryQueueClient::new("resultados", Duration::from_secs(1));
/// queue.push(r#"{"ValorAtual": 1}"#).await;
/// let msg = queue.receive().await?;
/// ```
pub struct InMemoryQueueClient {
    name: String,
    poll_timeout: Duration,
    state: Mutex<QueueState>,
    notify: Notify,
}

impl InMemoryQueueClient {
    pub fn new(name: impl Into<String>, poll_timeout: Duration) -> Self {
        Self {
            name: name.into(),
            poll_timeout,
            state: Mutex::new(QueueState::default()),
            notify: Notify::new(),
        }
    }

    /// Enqueue a body and return the generated message id.
    pub async fn push(&self, body: impl Into<String>) -> String {
        let id = Ulid::new().to_string();
        let message = RawMessage::new(id.clone(), Ulid::new().to_string(), body);
        self.state.lock().await.ready.push_back(message);
        self.notify.notify_one();
        id
    }

    /// Messages waiting to be received.
    pub async fn len(&self) -> usize {
        self.state.lock().await.ready.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of successful deletes so far.
    pub async fn deleted_count(&self) -> usize {
        self.state.lock().await.deleted
    }

    /// Messages received but not deleted.
    pub async fn in_flight_count(&self) -> usize {
        self.state.lock().await.in_flight.len()
    }
}

#[async_trait]
impl QueueClient for InMemoryQueueClient {
    fn queue_name(&self) -> &str {
        &self.name
    }

    async fn receive(&self) -> Result<Option<RawMessage>, TransportError> {
        let deadline = Instant::now() + self.poll_timeout;
        loop {
            {
                let mut state = self.state.lock().await;
                if let Some(message) = state.ready.pop_front() {
                    state
                        .in_flight
                        .insert(message.receipt.clone(), message.id.clone());
                    return Ok(Some(message));
                }
            }
            // ロックを離してから待つ（ロック跨ぎ await しない）
            if tokio::time::timeout_at(deadline, self.notify.notified())
                .await
                .is_err()
            {
                return Ok(None);
            }
        }
    }

    async fn delete(&self, id: &str, receipt: &str) -> Result<(), TransportError> {
        let mut state = self.state.lock().await;
        match state.in_flight.get(receipt) {
            Some(owner) if owner == id => {
                state.in_flight.remove(receipt);
                state.deleted += 1;
                Ok(())
            }
            _ => Err(TransportError::Delete {
                id: id.to_string(),
                reason: "unknown receipt".to_string(),
            }),
        }
    }
}
