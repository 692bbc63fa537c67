//! tally-core
//!
//! Core building blocks for the tally worker: a single loop that drains a
//! queue of counter results and persists them.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（RawMessage, ResultRecord, errors）
//! - **codec**: 本文 → ResultRecord（フィールド名は大文字小文字を区別しない）
//! - **ports**: 抽象化レイヤー（QueueClient, RecordStore, TelemetrySink）
//! - **impls**: 開発・テスト用の実装（InMemoryQueueClient など）
//! - **app**: 消費ループ（WorkerLoop）と起動ハンドル（Worker）
//! - **config**: 環境変数からの設定
//! - **observability**: tracing subscriber の初期化

pub mod app;
pub mod codec;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
