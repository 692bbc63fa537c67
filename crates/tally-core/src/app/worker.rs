//! Worker - ループを tokio タスクとして起動・停止するハンドル

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app::WorkerLoop;
use crate::domain::WorkerError;

/// Handle to a spawned worker loop.
/// - `request_shutdown()` で次の receive 前に止まる
/// - `shutdown_tx` を drop してもワーカーは止まる
/// - `shutdown_and_join()` で停止を待ち、ループの結果を受け取る
pub struct Worker {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<Result<(), WorkerError>>,
}

impl Worker {
    /// Spawn the loop on the current runtime.
    pub fn spawn(worker_loop: Arc<WorkerLoop>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(async move { worker_loop.run(shutdown_rx).await });
        Self { shutdown_tx, join }
    }

    /// Request shutdown. The message in hand, if any, is still finished.
    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    /// True once the loop has returned (shutdown or transport failure).
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Run until `signal` resolves or the loop stops by itself, whichever is first.
    pub async fn run_until<F>(mut self, signal: F) -> Result<(), WorkerError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            joined = &mut self.join => return flatten(joined),
            _ = signal => {}
        }
        self.shutdown_and_join().await
    }

    /// Shutdown and wait for the loop.
    pub async fn shutdown_and_join(self) -> Result<(), WorkerError> {
        self.request_shutdown();
        self.join().await
    }

    /// Wait for the loop without requesting shutdown.
    pub async fn join(self) -> Result<(), WorkerError> {
        flatten(self.join.await)
    }
}

fn flatten(
    joined: Result<Result<(), WorkerError>, tokio::task::JoinError>,
) -> Result<(), WorkerError> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(WorkerError::Join(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{InMemoryQueueClient, InMemoryRecordStore, TracingTelemetrySink};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn spawned_worker_drains_queue_and_stops() {
        let queue = Arc::new(InMemoryQueueClient::new("resultados", Duration::from_millis(50)));
        let store = Arc::new(InMemoryRecordStore::new());
        queue.push(r#"{"ValorAtual": 10}"#).await;
        queue.push(r#"{"ValorAtual": 11}"#).await;

        let worker = Worker::spawn(Arc::new(WorkerLoop::new(
            queue.clone(),
            store.clone(),
            Arc::new(TracingTelemetrySink::new("test")),
        )));

        timeout(Duration::from_secs(5), async {
            while store.records().await.len() < 2 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();

        assert!(!worker.is_finished());
        timeout(Duration::from_secs(1), worker.shutdown_and_join())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(queue.deleted_count().await, 2);
    }

    #[tokio::test]
    async fn run_until_returns_transport_failure_without_signal() {
        use crate::domain::{RawMessage, TransportError};
        use crate::ports::{MockQueueClient, QueueClient};

        let mut queue = MockQueueClient::new();
        queue.expect_queue_name().return_const("resultados".to_string());
        queue
            .expect_receive()
            .returning(|| Ok(Some(RawMessage::new("m", "r", "{}"))));
        queue.expect_delete().returning(|id, _| {
            Err(TransportError::Delete {
                id: id.to_string(),
                reason: "access denied".to_string(),
            })
        });
        let queue: Arc<dyn QueueClient> = Arc::new(queue);

        let worker = Worker::spawn(Arc::new(WorkerLoop::new(
            queue,
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(TracingTelemetrySink::new("test")),
        )));

        let result = timeout(
            Duration::from_secs(1),
            worker.run_until(std::future::pending::<()>()),
        )
        .await
        .unwrap();
        assert!(matches!(result, Err(WorkerError::Transport(_))));
    }

    #[tokio::test]
    async fn run_until_stops_on_signal() {
        let queue = Arc::new(InMemoryQueueClient::new("resultados", Duration::from_secs(30)));
        let worker = Worker::spawn(Arc::new(WorkerLoop::new(
            queue,
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(TracingTelemetrySink::new("test")),
        )));

        let signal = tokio::time::sleep(Duration::from_millis(50));
        timeout(Duration::from_secs(1), worker.run_until(signal))
            .await
            .unwrap()
            .unwrap();
    }
}
