use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dotacup::provider::{ProviderError, RawGameStats, StatsProvider};

/// Stats provider scripted per external match id. Each call pops the next
/// queued response for that id; ids with nothing queued report unavailable,
/// which the retry queue treats as a transient failure.
pub struct ScriptedProvider {
    responses: Mutex<HashMap<i64, Vec<Result<RawGameStats, ProviderError>>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
        }
    }

    pub fn push(&self, opendota_match_id: i64, response: Result<RawGameStats, ProviderError>) {
        self.responses
            .lock()
            .unwrap()
            .entry(opendota_match_id)
            .or_default()
            .push(response);
    }
}

#[async_trait]
impl StatsProvider for ScriptedProvider {
    async fn fetch_game_stats(
        &self,
        opendota_match_id: i64,
    ) -> Result<RawGameStats, ProviderError> {
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&opendota_match_id) {
            Some(queue) if !queue.is_empty() => queue.remove(0),
            _ => Err(ProviderError::Unavailable("no scripted response".into())),
        }
    }
}
