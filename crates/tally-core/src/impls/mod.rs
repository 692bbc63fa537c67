//! Impls - 実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryQueueClient**: プロセス内キュー（long-poll 付き）
//! - **InMemoryRecordStore**: 保存結果をメモリに保持
//! - **TracingTelemetrySink**: トレースを `tracing` イベントとして出力
//!
//! # 本番用実装
//! - `tally-sqs`: SqsQueueClient
//! - `tally-pg`: PostgresRecordStore

pub mod inmem_queue;
pub mod inmem_store;
pub mod tracing_sink;

pub use self::inmem_queue::InMemoryQueueClient;
pub use self::inmem_store::InMemoryRecordStore;
pub use self::tracing_sink::{TELEMETRY_TARGET, TracingTelemetrySink};
