use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::StoreError;

use super::models::UnparsedGame;

#[async_trait]
pub trait UnparsedQueue: Send + Sync {
    /// Inserts the entry unless one already exists for the same external
    /// match id. Returns whether an insert happened.
    async fn insert_if_absent(&self, entry: UnparsedGame) -> Result<bool, StoreError>;
    async fn list(&self) -> Result<Vec<UnparsedGame>, StoreError>;
    async fn remove(&self, opendota_match_id: i64) -> Result<(), StoreError>;
    /// Stamps a failed attempt and returns the new attempt count.
    async fn record_attempt(
        &self,
        opendota_match_id: i64,
        at: DateTime<Utc>,
    ) -> Result<u32, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryUnparsedQueue {
    entries: Arc<RwLock<HashMap<i64, UnparsedGame>>>,
}

impl InMemoryUnparsedQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnparsedQueue for InMemoryUnparsedQueue {
    async fn insert_if_absent(&self, entry: UnparsedGame) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.opendota_match_id) {
            return Ok(false);
        }
        entries.insert(entry.opendota_match_id, entry);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<UnparsedGame>, StoreError> {
        let entries = self.entries.read().await;
        let mut out: Vec<UnparsedGame> = entries.values().cloned().collect();
        out.sort_by_key(|e| e.opendota_match_id);
        Ok(out)
    }

    async fn remove(&self, opendota_match_id: i64) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(&opendota_match_id);
        Ok(())
    }

    async fn record_attempt(
        &self,
        opendota_match_id: i64,
        at: DateTime<Utc>,
    ) -> Result<u32, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(&opendota_match_id)
            .ok_or_else(|| StoreError::NotFound(format!("unparsed game {opendota_match_id}")))?;
        entry.attempt_count += 1;
        entry.last_attempt_at = Some(at);
        Ok(entry.attempt_count)
    }
}
