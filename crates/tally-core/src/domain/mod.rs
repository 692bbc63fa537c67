//! Domain model (messages, records, errors).
//!
//! - message: キューから受け取った生メッセージ
//! - record: 保存対象のカウンタ結果
//! - errors: decode / store / transport のエラー分類

pub mod errors;
pub mod message;
pub mod record;

pub use self::errors::{DecodeError, StoreError, TransportError, WorkerError};
pub use self::message::RawMessage;
pub use self::record::ResultRecord;
