use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::StoreError;

use super::models::UserFantasySummary;

#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Replaces the whole leaderboard. Overwrite semantics.
    async fn replace_summaries(&self, summaries: Vec<UserFantasySummary>) -> Result<(), StoreError>;
    async fn list_summaries(&self) -> Result<Vec<UserFantasySummary>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryLeaderboardStore {
    summaries: Arc<RwLock<Vec<UserFantasySummary>>>,
}

impl InMemoryLeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaderboardStore for InMemoryLeaderboardStore {
    async fn replace_summaries(&self, summaries: Vec<UserFantasySummary>) -> Result<(), StoreError> {
        let mut stored = self.summaries.write().await;
        *stored = summaries;
        Ok(())
    }

    async fn list_summaries(&self) -> Result<Vec<UserFantasySummary>, StoreError> {
        let stored = self.summaries.read().await;
        Ok(stored.clone())
    }
}
