use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::shared::StoreError;
use crate::tournament::MatchStore;

use super::models::{FantasyRoundScore, ScoreBreakdown};
use super::repository::FantasyStore;
use super::scoring::score_game;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundScoringOutcome {
    pub games_scored: usize,
    /// Games of completed matches that still have no parsed payload.
    pub skipped_unparsed: usize,
    pub users_scored: usize,
}

/// Computes fantasy scores per round. Scores are a pure function of the
/// round's parsed game stats, the lineups and the weight table, so
/// recomputation always overwrites and never increments.
#[derive(Clone)]
pub struct FantasyEngine {
    matches: Arc<dyn MatchStore>,
    store: Arc<dyn FantasyStore>,
    config: ScoringConfig,
}

impl FantasyEngine {
    pub fn new(
        matches: Arc<dyn MatchStore>,
        store: Arc<dyn FantasyStore>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            matches,
            store,
            config,
        }
    }

    pub async fn recompute_round(&self, round_id: &str) -> Result<RoundScoringOutcome, StoreError> {
        let roster = self.matches.list_players().await?;
        let lineups = self.store.list_lineups().await?;
        let mut outcome = RoundScoringOutcome::default();

        // (user, player) -> accumulated entry
        let mut acc: BTreeMap<(String, String), FantasyRoundScore> = BTreeMap::new();

        for m in self.matches.list_round_matches(round_id).await? {
            if !m.is_completed() {
                continue;
            }
            for game in self.matches.list_match_games(&m.id).await? {
                let Some(stats) = &game.stats else {
                    warn!(game_id = %game.id, match_id = %m.id, "unparsed game skipped in scoring");
                    outcome.skipped_unparsed += 1;
                    continue;
                };
                let per_player = score_game(stats, &roster, &self.config);
                outcome.games_scored += 1;

                for lineup in &lineups {
                    for player_id in &lineup.player_ids {
                        let Some(game_score) = per_player.get(player_id) else {
                            continue;
                        };
                        let entry = acc
                            .entry((lineup.user_id.clone(), player_id.clone()))
                            .or_insert_with(|| FantasyRoundScore {
                                user_id: lineup.user_id.clone(),
                                round_id: round_id.to_string(),
                                player_id: player_id.clone(),
                                score: 0.0,
                                breakdown: ScoreBreakdown::default(),
                                games_counted: 0,
                            });
                        entry.score += game_score.score;
                        entry.breakdown.add(&game_score.breakdown);
                        entry.games_counted += 1;
                    }
                }
            }
        }

        let entries: Vec<FantasyRoundScore> = acc.into_values().collect();
        outcome.users_scored = entries
            .iter()
            .map(|e| e.user_id.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        self.store.replace_round_scores(round_id, entries).await?;

        debug!(
            round_id,
            games = outcome.games_scored,
            skipped = outcome.skipped_unparsed,
            users = outcome.users_scored,
            "fantasy round recomputed"
        );
        Ok(outcome)
    }

    /// Full recalculation over every round that has matches.
    pub async fn recompute_all(&self) -> Result<Vec<(String, RoundScoringOutcome)>, StoreError> {
        let mut outcomes = Vec::new();
        for round_id in self.round_ids().await? {
            let outcome = self.recompute_round(&round_id).await?;
            outcomes.push((round_id, outcome));
        }
        Ok(outcomes)
    }

    pub async fn round_ids(&self) -> Result<Vec<String>, StoreError> {
        let matches = self.matches.list_matches().await?;
        let mut rounds: Vec<String> = matches.into_iter().map(|m| m.round_id).collect();
        rounds.sort();
        rounds.dedup();
        Ok(rounds)
    }
}
