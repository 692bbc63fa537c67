//! RecordStore port - ResultRecord の永続化

use async_trait::async_trait;

use crate::domain::{ResultRecord, StoreError};

/// Persistence for decoded results. The error's `Display` is what gets logged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn save(&self, record: &ResultRecord) -> Result<(), StoreError>;
}
