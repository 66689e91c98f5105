use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::StoreError;

use super::models::{Group, TeamStanding};

#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn upsert_group(&self, group: Group) -> Result<(), StoreError>;
    async fn get_group(&self, id: &str) -> Result<Option<Group>, StoreError>;
    async fn list_groups(&self) -> Result<Vec<Group>, StoreError>;
    /// Replaces the entire standings array. Overwrite semantics, not merge.
    async fn write_standings(
        &self,
        group_id: &str,
        standings: Vec<TeamStanding>,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    groups: Arc<RwLock<HashMap<String, Group>>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupStore for InMemoryGroupStore {
    async fn upsert_group(&self, group: Group) -> Result<(), StoreError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, id: &str) -> Result<Option<Group>, StoreError> {
        let groups = self.groups.read().await;
        Ok(groups.get(id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, StoreError> {
        let groups = self.groups.read().await;
        let mut out: Vec<Group> = groups.values().cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }

    async fn write_standings(
        &self,
        group_id: &str,
        standings: Vec<TeamStanding>,
    ) -> Result<(), StoreError> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| StoreError::NotFound(format!("group {group_id}")))?;
        group.standings = standings;
        Ok(())
    }
}
