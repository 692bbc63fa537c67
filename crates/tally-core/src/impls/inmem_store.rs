//! InMemoryRecordStore - 保存結果をメモリに保持（開発・テスト用）

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ResultRecord, StoreError};
use crate::ports::RecordStore;

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<ResultRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything saved so far, in save order.
    pub async fn records(&self) -> Vec<ResultRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, record: &ResultRecord) -> Result<(), StoreError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_records_in_save_order() {
        let store = InMemoryRecordStore::new();
        store.save(&ResultRecord::new(1)).await.unwrap();
        store.save(&ResultRecord::new(2)).await.unwrap();

        let values: Vec<i64> = store
            .records()
            .await
            .iter()
            .map(|r| r.current_value)
            .collect();
        assert_eq!(values, vec![1, 2]);
    }
}
