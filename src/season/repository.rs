use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::StoreError;

use super::models::ComprehensiveStats;

#[async_trait]
pub trait SeasonStatsStore: Send + Sync {
    /// Replaces the whole aggregate document.
    async fn replace(&self, stats: ComprehensiveStats) -> Result<(), StoreError>;
    async fn get(&self) -> Result<Option<ComprehensiveStats>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemorySeasonStatsStore {
    stats: Arc<RwLock<Option<ComprehensiveStats>>>,
}

impl InMemorySeasonStatsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeasonStatsStore for InMemorySeasonStatsStore {
    async fn replace(&self, stats: ComprehensiveStats) -> Result<(), StoreError> {
        let mut stored = self.stats.write().await;
        *stored = Some(stats);
        Ok(())
    }

    async fn get(&self) -> Result<Option<ComprehensiveStats>, StoreError> {
        let stored = self.stats.read().await;
        Ok(stored.clone())
    }
}
