use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::StoreError;

use super::models::PlayoffBracket;

#[async_trait]
pub trait BracketStore: Send + Sync {
    async fn upsert_bracket(&self, bracket: PlayoffBracket) -> Result<(), StoreError>;
    async fn get_bracket(&self, id: &str) -> Result<Option<PlayoffBracket>, StoreError>;
    async fn list_brackets(&self) -> Result<Vec<PlayoffBracket>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryBracketStore {
    brackets: Arc<RwLock<HashMap<String, PlayoffBracket>>>,
}

impl InMemoryBracketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BracketStore for InMemoryBracketStore {
    async fn upsert_bracket(&self, bracket: PlayoffBracket) -> Result<(), StoreError> {
        let mut brackets = self.brackets.write().await;
        brackets.insert(bracket.id.clone(), bracket);
        Ok(())
    }

    async fn get_bracket(&self, id: &str) -> Result<Option<PlayoffBracket>, StoreError> {
        let brackets = self.brackets.read().await;
        Ok(brackets.get(id).cloned())
    }

    async fn list_brackets(&self) -> Result<Vec<PlayoffBracket>, StoreError> {
        let brackets = self.brackets.read().await;
        let mut out: Vec<PlayoffBracket> = brackets.values().cloned().collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }
}
