//! App - アプリケーション層
//!
//! ports を組み合わせて消費ループを実装する。
//!
//! # 主要コンポーネント
//! - **WorkerLoop**: receive → delete → decode → save のループ
//! - **Worker**: ループを起動して停止を待つハンドル

pub mod worker;
pub mod worker_loop;

pub use self::worker::Worker;
pub use self::worker_loop::{IterationOutcome, WorkerLoop};
