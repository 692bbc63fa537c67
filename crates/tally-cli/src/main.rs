use std::sync::Arc;

use anyhow::Context;
use tally_core::app::{Worker, WorkerLoop};
use tally_core::config::WorkerConfig;
use tally_core::impls::TracingTelemetrySink;
use tally_core::observability::init_tracing;
use tally_pg::PostgresRecordStore;
use tally_sqs::SqsQueueClient;
use tracing::{error, info};

const SERVICE_NAME: &str = "tally-worker";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env は任意
    let _ = dotenvy::dotenv();

    let config = WorkerConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log_level, config.log_format)
        .context("failed to initialize tracing")?;
    config.validate()?;

    info!(queue = %config.queue_name, "queue storage configured");

    // (A) 長寿命の接続を起動時に一度だけ作る
    let queue = SqsQueueClient::connect(
        &config.queue_connection_string,
        &config.queue_region,
        &config.queue_name,
        config.poll_wait(),
    )
    .await
    .context("failed to connect to queue")?;

    let store = PostgresRecordStore::connect(
        config.database_url()?,
        config.database_pool_size,
        config.consumer_name.clone(),
    )?;
    store
        .ensure_schema()
        .await
        .context("failed to prepare database schema")?;

    let telemetry = TracingTelemetrySink::new(SERVICE_NAME);

    // (B) ループを起動
    let worker = Worker::spawn(Arc::new(WorkerLoop::new(
        Arc::new(queue),
        Arc::new(store),
        Arc::new(telemetry),
    )));

    // (C) シグナルかワーカー終了（transport エラー）まで待つ
    match worker.run_until(shutdown_signal()).await {
        Ok(()) => {
            info!("worker stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "worker failed");
            Err(e.into())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, finishing current message");
}
