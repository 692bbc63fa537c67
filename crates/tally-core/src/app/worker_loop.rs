//! WorkerLoop - メッセージ消費ループ
//!
//! # フロー（1 イテレーション）
//! 1. shutdown を確認してから QueueClient::receive()（long-poll、shutdown と競合）
//! 2. 受信したら即 delete（処理結果に関係なく、先に削除する = at-most-once）
//! 3. 本文をログ出力
//! 4. decode。失敗ならエラーログを出してこのメッセージは終わり
//! 5. decode 成功をトレース
//! 6. RecordStore::save()。失敗はエラーログのみ（リトライ・再投入なし）
//!
//! decode / save の失敗はループを止めない。receive / delete の失敗は
//! `WorkerError::Transport` として run() から返る（fail-fast）。

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use crate::codec;
use crate::domain::{RawMessage, TransportError, WorkerError};
use crate::ports::{QueueClient, RecordStore, TelemetrySink};

/// Longest body slice written to a single log line.
const MAX_LOGGED_BODY: usize = 4096;

/// What happened to a message after it was taken off the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    Saved,
    DecodeFailed,
    SaveFailed,
}

/// Drains a queue into a record store, one message at a time.
pub struct WorkerLoop {
    queue_name: String,
    queue: Arc<dyn QueueClient>,
    store: Arc<dyn RecordStore>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl WorkerLoop {
    pub fn new(
        queue: Arc<dyn QueueClient>,
        store: Arc<dyn RecordStore>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            queue_name: queue.queue_name().to_string(),
            queue,
            store,
            telemetry,
        }
    }

    /// Run until `shutdown` turns true or its sender is dropped.
    ///
    /// A message that was already deleted is always carried through decode
    /// and save, even if shutdown arrives in the meantime.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), WorkerError> {
        info!(queue = %self.queue_name, "starting message processing");

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            // receive は待つ可能性があるので select で shutdown と競合させる
            let received = tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        // sender が drop された = 停止
                        break;
                    }
                    continue;
                }
                received = self.queue.receive() => received,
            };

            let message = match received {
                Ok(Some(message)) => message,
                Ok(None) => continue,
                Err(e) => {
                    error!(queue = %self.queue_name, error = %e, "receive failed, stopping worker");
                    return Err(e.into());
                }
            };

            if let Err(e) = self.process_message(message).await {
                error!(queue = %self.queue_name, error = %e, "delete failed, stopping worker");
                return Err(e.into());
            }
        }

        info!(queue = %self.queue_name, "worker loop stopped");
        Ok(())
    }

    /// Handle one received message: delete, decode, save.
    ///
    /// Only a failed delete is returned as an error; decode and save failures
    /// are logged and reported through the outcome.
    pub async fn process_message(
        &self,
        message: RawMessage,
    ) -> Result<IterationOutcome, TransportError> {
        self.queue.delete(&message.id, &message.receipt).await?;

        info!(
            queue = %self.queue_name,
            message_id = %message.id,
            body = %truncate_for_log(&message.body),
            "new message"
        );

        let record = match codec::decode(&message.body) {
            Ok(record) => record,
            Err(e) => {
                error!(
                    queue = %self.queue_name,
                    message_id = %message.id,
                    error = %e,
                    "invalid data for result"
                );
                return Ok(IterationOutcome::DecodeFailed);
            }
        };

        self.telemetry
            .track_trace(&format!("deserialization succeeded | {}", message.body));

        match self.store.save(&record).await {
            Ok(()) => {
                info!(
                    queue = %self.queue_name,
                    message_id = %message.id,
                    value = record.current_value,
                    "result saved"
                );
                self.telemetry.track_trace(&format!(
                    "result processed | value = {}",
                    record.current_value
                ));
                info!(queue = %self.queue_name, "waiting for next message");
                Ok(IterationOutcome::Saved)
            }
            Err(e) => {
                error!(
                    queue = %self.queue_name,
                    message_id = %message.id,
                    error = %e,
                    "failed to save result"
                );
                Ok(IterationOutcome::SaveFailed)
            }
        }
    }
}

fn truncate_for_log(body: &str) -> &str {
    if body.len() <= MAX_LOGGED_BODY {
        return body;
    }
    let mut end = MAX_LOGGED_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
