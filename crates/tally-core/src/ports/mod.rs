//! Ports - 抽象化レイヤー
//!
//! ループが依存する外部システムへのインターフェース。
//! 本番実装は別クレート（`tally-sqs`, `tally-pg`）、開発・テスト用は `impls` に置く。

pub mod queue_client;
pub mod record_store;
pub mod event_sink;

pub use self::queue_client::QueueClient;
pub use self::record_store::RecordStore;
pub use self::event_sink::TelemetrySink;

#[cfg(test)]
pub use self::event_sink::MockTelemetrySink;
#[cfg(test)]
pub use self::queue_client::MockQueueClient;
#[cfg(test)]
pub use self::record_store::MockRecordStore;
