//! TracingTelemetrySink - トレースを `tracing` イベントとして出力
//!
//! ログ行とは target を分けているので、subscriber 側でトレース用の
//! バックエンドにだけ流すことができる。

use crate::ports::TelemetrySink;

/// `tracing` target used for trace events.
pub const TELEMETRY_TARGET: &str = "tally::telemetry";

#[derive(Debug, Clone, Default)]
pub struct TracingTelemetrySink {
    service: String,
}

impl TracingTelemetrySink {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl TelemetrySink for TracingTelemetrySink {
    fn track_trace(&self, message: &str) {
        tracing::info!(
            target: TELEMETRY_TARGET,
            service = %self.service,
            trace = %message,
            "trace"
        );
    }
}
