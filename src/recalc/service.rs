use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::bracket::{BracketResolver, BracketStore};
use crate::config::EngineConfig;
use crate::fantasy::{FantasyEngine, FantasyStore};
use crate::leaderboard::{LeaderboardAggregator, LeaderboardStore};
use crate::provider::StatsProvider;
use crate::season::{SeasonStatsCalculator, SeasonStatsStore};
use crate::shared::StoreError;
use crate::standings::{GroupStore, StandingsAggregator};
use crate::tournament::MatchStore;
use crate::unparsed::{QueueStatus, RetryReport, UnparsedGameService, UnparsedQueue};

use super::report::{RecalcReport, Stage, StageReport};

/// Retry sweep outcome plus the downstream recomputation it triggered.
#[derive(Debug, Clone, Serialize)]
pub struct RetrySweepOutcome {
    #[serde(flatten)]
    pub retry: RetryReport,
    pub stages: Vec<StageReport>,
}

/// Drives the recalculation pipeline. Every trigger runs its stages in a
/// fixed order and keeps going past a failed stage: each stage overwrites
/// derived state from facts, so whatever earlier stages wrote stays valid
/// and the failed stage heals on the next run.
pub struct RecalcOrchestrator {
    matches: Arc<dyn MatchStore>,
    groups: Arc<dyn GroupStore>,
    brackets: Arc<dyn BracketStore>,
    standings: StandingsAggregator,
    bracket: BracketResolver,
    fantasy: FantasyEngine,
    leaderboard: LeaderboardAggregator,
    season: SeasonStatsCalculator,
    unparsed: UnparsedGameService,
    config: EngineConfig,
}

impl RecalcOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        matches: Arc<dyn MatchStore>,
        groups: Arc<dyn GroupStore>,
        brackets: Arc<dyn BracketStore>,
        fantasy_store: Arc<dyn FantasyStore>,
        leaderboard_store: Arc<dyn LeaderboardStore>,
        season_store: Arc<dyn SeasonStatsStore>,
        queue: Arc<dyn UnparsedQueue>,
        provider: Arc<dyn StatsProvider>,
        config: EngineConfig,
    ) -> Self {
        let standings = StandingsAggregator::new(matches.clone(), groups.clone());
        let bracket = BracketResolver::new(matches.clone(), brackets.clone());
        let fantasy = FantasyEngine::new(
            matches.clone(),
            fantasy_store.clone(),
            config.scoring.clone(),
        );
        let leaderboard = LeaderboardAggregator::new(fantasy_store, leaderboard_store);
        let season = SeasonStatsCalculator::new(matches.clone(), season_store);
        let unparsed = UnparsedGameService::new(matches.clone(), queue, provider);

        Self {
            matches,
            groups,
            brackets,
            standings,
            bracket,
            fantasy,
            leaderboard,
            season,
            unparsed,
            config,
        }
    }

    /// Reacts to one match result changing: queue its unparsed games, then
    /// rebuild the standings, brackets, fantasy round and leaderboard that
    /// depend on it.
    pub async fn match_updated(&self, match_id: &str) -> Result<RecalcReport, StoreError> {
        let m = self
            .matches
            .get_match(match_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("match {match_id}")))?;

        info!(match_id, round_id = %m.round_id, "recalculating after match update");
        let mut report = RecalcReport::default();

        report.push(match self.unparsed.enqueue_if_missing(&m).await {
            Ok(queued) => StageReport::ok(Stage::UnparsedEnqueue, queued, 0),
            Err(err) => StageReport::failed(Stage::UnparsedEnqueue, err.to_string()),
        });

        report.push(match &m.group_id {
            Some(group_id) => match self.standings.recompute_group(group_id).await {
                Ok(outcome) => {
                    StageReport::ok(Stage::Standings, outcome.matches_processed, outcome.skipped)
                }
                Err(err) => StageReport::failed(Stage::Standings, err.to_string()),
            },
            None => StageReport::ok(Stage::Standings, 0, 0),
        });

        report.push(self.bracket_stage(Some(match_id)).await);

        report.push(match self.fantasy.recompute_round(&m.round_id).await {
            Ok(outcome) => {
                StageReport::ok(Stage::Fantasy, outcome.games_scored, outcome.skipped_unparsed)
            }
            Err(err) => StageReport::failed(Stage::Fantasy, err.to_string()),
        });

        report.push(self.leaderboard_stage().await);

        if !report.success() {
            warn!(match_id, "recalculation finished with failed stages");
        }
        Ok(report)
    }

    /// Full rebuild of everything derived from match results. Group and
    /// bracket recomputations run concurrently up to the configured limit.
    pub async fn full_rebuild(&self) -> Result<RecalcReport, StoreError> {
        let limit = self.config.concurrency_limit.get();
        let mut report = RecalcReport::default();

        report.push(self.enqueue_all_stage(limit).await);

        report.push(match self.groups.list_groups().await {
            Ok(groups) => {
                let results: Vec<_> = stream::iter(groups)
                    .map(|group| {
                        let standings = self.standings.clone();
                        async move { standings.recompute_group(&group.id).await }
                    })
                    .buffer_unordered(limit)
                    .collect()
                    .await;
                fold_stage(Stage::Standings, results, |o| (o.matches_processed, o.skipped))
            }
            Err(err) => StageReport::failed(Stage::Standings, err.to_string()),
        });

        report.push(self.bracket_stage(None).await);

        report.push(match self.fantasy.recompute_all().await {
            Ok(outcomes) => {
                let (processed, skipped) = outcomes.iter().fold((0, 0), |(p, s), (_, o)| {
                    (p + o.games_scored, s + o.skipped_unparsed)
                });
                StageReport::ok(Stage::Fantasy, processed, skipped)
            }
            Err(err) => StageReport::failed(Stage::Fantasy, err.to_string()),
        });

        report.push(self.leaderboard_stage().await);

        report.push(match self.season.recompute_all().await {
            Ok(outcome) => {
                StageReport::ok(Stage::SeasonStats, outcome.games_counted, outcome.skipped_unparsed)
            }
            Err(err) => StageReport::failed(Stage::SeasonStats, err.to_string()),
        });

        info!(success = report.success(), "full rebuild finished");
        Ok(report)
    }

    /// Recomputes fantasy scores for one round, or every round, then the
    /// leaderboard that depends on them.
    pub async fn recalc_fantasy(&self, round_id: Option<&str>) -> Result<RecalcReport, StoreError> {
        let mut report = RecalcReport::default();

        report.push(match round_id {
            Some(round_id) => match self.fantasy.recompute_round(round_id).await {
                Ok(outcome) => {
                    StageReport::ok(Stage::Fantasy, outcome.games_scored, outcome.skipped_unparsed)
                }
                Err(err) => StageReport::failed(Stage::Fantasy, err.to_string()),
            },
            None => match self.fantasy.recompute_all().await {
                Ok(outcomes) => {
                    let (processed, skipped) = outcomes.iter().fold((0, 0), |(p, s), (_, o)| {
                        (p + o.games_scored, s + o.skipped_unparsed)
                    });
                    StageReport::ok(Stage::Fantasy, processed, skipped)
                }
                Err(err) => StageReport::failed(Stage::Fantasy, err.to_string()),
            },
        });

        report.push(self.leaderboard_stage().await);
        Ok(report)
    }

    /// Rebuilds the season-wide comprehensive stats document.
    pub async fn recalc_comprehensive_stats(&self) -> Result<RecalcReport, StoreError> {
        let mut report = RecalcReport::default();
        report.push(match self.season.recompute_all().await {
            Ok(outcome) => {
                StageReport::ok(Stage::SeasonStats, outcome.games_counted, outcome.skipped_unparsed)
            }
            Err(err) => StageReport::failed(Stage::SeasonStats, err.to_string()),
        });
        Ok(report)
    }

    /// One retry sweep over the unparsed queue, then fantasy and leaderboard
    /// recomputation for every round a game was parsed for.
    pub async fn retry_unparsed_games(&self) -> Result<RetrySweepOutcome, StoreError> {
        let retry = self.unparsed.retry(&self.config.retry).await?;
        let mut stages = vec![StageReport::ok(
            Stage::RetrySweep,
            retry.parsed_count,
            retry.still_unparsed_count,
        )];

        if !retry.parsed_rounds.is_empty() {
            for round_id in &retry.parsed_rounds {
                stages.push(match self.fantasy.recompute_round(round_id).await {
                    Ok(outcome) => StageReport::ok(
                        Stage::Fantasy,
                        outcome.games_scored,
                        outcome.skipped_unparsed,
                    ),
                    Err(err) => StageReport::failed(Stage::Fantasy, err.to_string()),
                });
            }
            stages.push(self.leaderboard_stage().await);
        }

        Ok(RetrySweepOutcome { retry, stages })
    }

    /// Queue snapshot; exhausted entries are reported, never dropped.
    pub async fn check_unparsed_games(&self) -> Result<QueueStatus, StoreError> {
        self.unparsed.check(&self.config.retry).await
    }

    /// Recomputes the brackets touched by `match_id`, or every bracket.
    async fn bracket_stage(&self, match_id: Option<&str>) -> StageReport {
        let brackets = match self.brackets.list_brackets().await {
            Ok(brackets) => brackets,
            Err(err) => return StageReport::failed(Stage::Bracket, err.to_string()),
        };

        let mut stage = StageReport::ok(Stage::Bracket, 0, 0);
        for bracket in brackets {
            if let Some(match_id) = match_id {
                if !bracket.references_match(match_id) {
                    continue;
                }
            }
            match self.bracket.recompute_bracket(&bracket.id).await {
                Ok(outcome) => {
                    stage.processed += outcome.slots_resolved;
                    stage.skipped += outcome.skipped;
                }
                Err(err) => {
                    stage.failed += 1;
                    stage.error.get_or_insert_with(|| err.to_string());
                }
            }
        }
        stage
    }

    async fn leaderboard_stage(&self) -> StageReport {
        match self.leaderboard.recompute_user_summaries().await {
            Ok(outcome) => StageReport::ok(Stage::Leaderboard, outcome.users_ranked, 0),
            Err(err) => StageReport::failed(Stage::Leaderboard, err.to_string()),
        }
    }

    /// Queues unparsed games of every completed match, bounded-concurrent.
    async fn enqueue_all_stage(&self, limit: usize) -> StageReport {
        let matches = match self.matches.list_matches().await {
            Ok(matches) => matches,
            Err(err) => return StageReport::failed(Stage::UnparsedEnqueue, err.to_string()),
        };

        let results: Vec<_> = stream::iter(matches.into_iter().filter(|m| m.is_completed()))
            .map(|m| {
                let unparsed = self.unparsed.clone();
                async move { unparsed.enqueue_if_missing(&m).await }
            })
            .buffer_unordered(limit)
            .collect()
            .await;
        fold_stage(Stage::UnparsedEnqueue, results, |queued| (queued, 0))
    }
}

/// Collapses per-item results into one stage report. Item failures are
/// counted, never fatal; the first error message is kept for the report.
fn fold_stage<T>(
    stage: Stage,
    results: Vec<Result<T, StoreError>>,
    counts: impl Fn(T) -> (usize, usize),
) -> StageReport {
    let mut report = StageReport::ok(stage, 0, 0);
    for result in results {
        match result {
            Ok(outcome) => {
                let (processed, skipped) = counts(outcome);
                report.processed += processed;
                report.skipped += skipped;
            }
            Err(err) => {
                report.failed += 1;
                report.error.get_or_insert_with(|| err.to_string());
            }
        }
    }
    report
}
