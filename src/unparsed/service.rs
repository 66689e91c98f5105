use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::RetryPolicy;
use crate::provider::StatsProvider;
use crate::shared::StoreError;
use crate::tournament::models::Match;
use crate::tournament::MatchStore;

use super::models::UnparsedGame;
use super::repository::UnparsedQueue;

/// Outcome of one retry sweep. Individual fetch failures never abort the
/// sweep; they are counted here instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetryReport {
    pub parsed_count: usize,
    pub still_unparsed_count: usize,
    pub error_count: usize,
    /// Rounds whose fantasy scores need recomputing because a game of theirs
    /// just got parsed.
    pub parsed_rounds: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueEntryStatus {
    pub opendota_match_id: i64,
    pub match_id: String,
    pub game_number: u8,
    pub attempt_count: u32,
    pub exhausted: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QueueStatus {
    pub total: usize,
    pub exhausted_count: usize,
    pub entries: Vec<QueueEntryStatus>,
}

#[derive(Clone)]
pub struct UnparsedGameService {
    matches: Arc<dyn MatchStore>,
    queue: Arc<dyn UnparsedQueue>,
    provider: Arc<dyn StatsProvider>,
}

impl UnparsedGameService {
    pub fn new(
        matches: Arc<dyn MatchStore>,
        queue: Arc<dyn UnparsedQueue>,
        provider: Arc<dyn StatsProvider>,
    ) -> Self {
        Self {
            matches,
            queue,
            provider,
        }
    }

    /// Queues every game of the match that has no parsed payload yet.
    /// Idempotent: games already queued are left untouched. Returns the
    /// number of newly queued games.
    pub async fn enqueue_if_missing(&self, m: &Match) -> Result<usize, StoreError> {
        let mut queued = 0;
        for game_id in &m.game_ids {
            let Some(game) = self.matches.get_game(game_id).await? else {
                warn!(match_id = %m.id, game_id = %game_id, "match references unknown game");
                continue;
            };
            if game.is_parsed() {
                continue;
            }

            let entry = UnparsedGame {
                opendota_match_id: game.opendota_match_id,
                game_id: game.id.clone(),
                match_id: m.id.clone(),
                game_number: game.game_number,
                radiant_team: team_name(m, true),
                dire_team: team_name(m, false),
                created_at: Utc::now(),
                last_attempt_at: None,
                attempt_count: 0,
            };
            if self.queue.insert_if_absent(entry).await? {
                info!(
                    match_id = %m.id,
                    opendota_match_id = game.opendota_match_id,
                    "queued unparsed game"
                );
                queued += 1;
            }
        }
        Ok(queued)
    }

    /// One bounded retry sweep over the queue. Entries that are exhausted or
    /// attempted too recently are skipped but still counted as unparsed.
    pub async fn retry(&self, policy: &RetryPolicy) -> Result<RetryReport, StoreError> {
        let now = Utc::now();
        let min_interval = policy.min_interval();
        let mut report = RetryReport::default();

        for entry in self.queue.list().await? {
            if entry.exhausted(policy.max_attempts) {
                warn!(
                    opendota_match_id = entry.opendota_match_id,
                    attempts = entry.attempt_count,
                    "unparsed game exhausted its retries"
                );
                report.still_unparsed_count += 1;
                continue;
            }
            if !entry.due(now, min_interval) {
                report.still_unparsed_count += 1;
                continue;
            }

            match self.provider.fetch_game_stats(entry.opendota_match_id).await {
                Ok(stats) => {
                    let Some(mut game) = self.matches.get_game(&entry.game_id).await? else {
                        warn!(
                            game_id = %entry.game_id,
                            "queued game no longer exists, dropping queue entry"
                        );
                        self.queue.remove(entry.opendota_match_id).await?;
                        report.error_count += 1;
                        continue;
                    };
                    game.stats = Some(stats);
                    self.matches.upsert_game(game).await?;
                    self.queue.remove(entry.opendota_match_id).await?;
                    report.parsed_count += 1;

                    if let Some(m) = self.matches.get_match(&entry.match_id).await? {
                        if !report.parsed_rounds.contains(&m.round_id) {
                            report.parsed_rounds.push(m.round_id);
                        }
                    }
                    info!(
                        opendota_match_id = entry.opendota_match_id,
                        "parsed queued game"
                    );
                }
                Err(err) => {
                    warn!(
                        opendota_match_id = entry.opendota_match_id,
                        retryable = err.is_retryable(),
                        error = %err,
                        "failed to fetch queued game"
                    );
                    self.queue.record_attempt(entry.opendota_match_id, now).await?;
                    report.still_unparsed_count += 1;
                    report.error_count += 1;
                }
            }
        }

        report.parsed_rounds.sort();
        Ok(report)
    }

    /// Queue snapshot with exhaustion flags; exhausted entries are reported
    /// here rather than dropped.
    pub async fn check(&self, policy: &RetryPolicy) -> Result<QueueStatus, StoreError> {
        let entries = self.queue.list().await?;
        let mut status = QueueStatus {
            total: entries.len(),
            ..QueueStatus::default()
        };
        for entry in entries {
            let exhausted = entry.exhausted(policy.max_attempts);
            if exhausted {
                status.exhausted_count += 1;
            }
            status.entries.push(QueueEntryStatus {
                opendota_match_id: entry.opendota_match_id,
                match_id: entry.match_id,
                game_number: entry.game_number,
                attempt_count: entry.attempt_count,
                exhausted,
            });
        }
        Ok(status)
    }
}

fn team_name(m: &Match, radiant: bool) -> String {
    let side = if radiant { &m.side_a } else { &m.side_b };
    side.team
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "unknown".to_string())
}
