//! TelemetrySink port - トレースイベントの送信
//!
//! ログとは別チャネルのトレース記録。副作用のみで、失敗してもループには影響しない。

/// Receives trace events from the worker loop.
///
/// A single long-lived sink is injected at startup. Implementations swallow
/// their own failures.
#[cfg_attr(test, mockall::automock)]
pub trait TelemetrySink: Send + Sync {
    fn track_trace(&self, message: &str);
}
