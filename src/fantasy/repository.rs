use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::StoreError;

use super::models::{FantasyLineup, FantasyRoundScore};

#[async_trait]
pub trait FantasyStore: Send + Sync {
    /// Replaces every score entry for the round. Overwrite, not increment:
    /// recomputation must leave no stale entries behind.
    async fn replace_round_scores(
        &self,
        round_id: &str,
        scores: Vec<FantasyRoundScore>,
    ) -> Result<(), StoreError>;
    async fn list_round_scores(&self, round_id: &str) -> Result<Vec<FantasyRoundScore>, StoreError>;
    async fn list_all_scores(&self) -> Result<Vec<FantasyRoundScore>, StoreError>;

    async fn upsert_lineup(&self, lineup: FantasyLineup) -> Result<(), StoreError>;
    async fn list_lineups(&self) -> Result<Vec<FantasyLineup>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryFantasyStore {
    rounds: Arc<RwLock<HashMap<String, Vec<FantasyRoundScore>>>>,
    lineups: Arc<RwLock<HashMap<String, FantasyLineup>>>,
}

impl InMemoryFantasyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FantasyStore for InMemoryFantasyStore {
    async fn replace_round_scores(
        &self,
        round_id: &str,
        scores: Vec<FantasyRoundScore>,
    ) -> Result<(), StoreError> {
        let mut rounds = self.rounds.write().await;
        rounds.insert(round_id.to_string(), scores);
        Ok(())
    }

    async fn list_round_scores(&self, round_id: &str) -> Result<Vec<FantasyRoundScore>, StoreError> {
        let rounds = self.rounds.read().await;
        Ok(rounds.get(round_id).cloned().unwrap_or_default())
    }

    async fn list_all_scores(&self) -> Result<Vec<FantasyRoundScore>, StoreError> {
        let rounds = self.rounds.read().await;
        let mut round_ids: Vec<&String> = rounds.keys().collect();
        round_ids.sort();
        Ok(round_ids
            .into_iter()
            .flat_map(|id| rounds[id].clone())
            .collect())
    }

    async fn upsert_lineup(&self, lineup: FantasyLineup) -> Result<(), StoreError> {
        let mut lineups = self.lineups.write().await;
        lineups.insert(lineup.user_id.clone(), lineup);
        Ok(())
    }

    async fn list_lineups(&self) -> Result<Vec<FantasyLineup>, StoreError> {
        let lineups = self.lineups.read().await;
        let mut out: Vec<FantasyLineup> = lineups.values().cloned().collect();
        out.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(out)
    }
}
