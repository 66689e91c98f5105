use std::sync::Arc;

use dotacup::bracket::InMemoryBracketStore;
use dotacup::fantasy::InMemoryFantasyStore;
use dotacup::leaderboard::InMemoryLeaderboardStore;
use dotacup::season::InMemorySeasonStatsStore;
use dotacup::standings::InMemoryGroupStore;
use dotacup::tournament::InMemoryMatchStore;
use dotacup::unparsed::InMemoryUnparsedQueue;
use dotacup::{EngineConfig, RecalcOrchestrator};

use super::mocks::ScriptedProvider;

/// Fully wired engine over in-memory stores and a scripted provider. Tests
/// reach into the stores directly to seed facts and assert derived state.
pub struct EngineSetup {
    pub matches: Arc<InMemoryMatchStore>,
    pub groups: Arc<InMemoryGroupStore>,
    pub brackets: Arc<InMemoryBracketStore>,
    pub fantasy: Arc<InMemoryFantasyStore>,
    pub leaderboard: Arc<InMemoryLeaderboardStore>,
    pub season: Arc<InMemorySeasonStatsStore>,
    pub queue: Arc<InMemoryUnparsedQueue>,
    pub provider: Arc<ScriptedProvider>,
    pub orchestrator: RecalcOrchestrator,
}

impl EngineSetup {
    pub fn new() -> Self {
        let matches = Arc::new(InMemoryMatchStore::new());
        let groups = Arc::new(InMemoryGroupStore::new());
        let brackets = Arc::new(InMemoryBracketStore::new());
        let fantasy = Arc::new(InMemoryFantasyStore::new());
        let leaderboard = Arc::new(InMemoryLeaderboardStore::new());
        let season = Arc::new(InMemorySeasonStatsStore::new());
        let queue = Arc::new(InMemoryUnparsedQueue::new());
        let provider = Arc::new(ScriptedProvider::new());

        // no time gating in tests, retries are driven explicitly
        let mut config = EngineConfig::default();
        config.retry.min_retry_interval_secs = 0;

        let orchestrator = RecalcOrchestrator::new(
            matches.clone(),
            groups.clone(),
            brackets.clone(),
            fantasy.clone(),
            leaderboard.clone(),
            season.clone(),
            queue.clone(),
            provider.clone(),
            config,
        );

        Self {
            matches,
            groups,
            brackets,
            fantasy,
            leaderboard,
            season,
            queue,
            provider,
            orchestrator,
        }
    }
}
