use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::fantasy::FantasyStore;
use crate::shared::StoreError;

use super::models::UserFantasySummary;
use super::repository::LeaderboardStore;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaderboardOutcome {
    pub users_ranked: usize,
}

#[derive(Clone)]
pub struct LeaderboardAggregator {
    fantasy: Arc<dyn FantasyStore>,
    store: Arc<dyn LeaderboardStore>,
}

impl LeaderboardAggregator {
    pub fn new(fantasy: Arc<dyn FantasyStore>, store: Arc<dyn LeaderboardStore>) -> Self {
        Self { fantasy, store }
    }

    /// Rebuilds every user summary from round scores and ranks them by total
    /// score descending, ties broken by user id ascending.
    pub async fn recompute_user_summaries(&self) -> Result<LeaderboardOutcome, StoreError> {
        let scores = self.fantasy.list_all_scores().await?;

        let mut by_user: BTreeMap<String, UserFantasySummary> = BTreeMap::new();
        // games per (user, round): every pick in a round covers the same
        // games, so the round's contribution is the max over its entries
        let mut round_games: BTreeMap<(String, String), u32> = BTreeMap::new();

        for score in scores {
            let summary = by_user
                .entry(score.user_id.clone())
                .or_insert_with(|| UserFantasySummary {
                    user_id: score.user_id.clone(),
                    round_totals: BTreeMap::new(),
                    total_score: 0.0,
                    games_counted: 0,
                    average_score: 0.0,
                    rank: 0,
                });
            *summary.round_totals.entry(score.round_id.clone()).or_insert(0.0) += score.score;
            summary.total_score += score.score;

            let games = round_games
                .entry((score.user_id.clone(), score.round_id.clone()))
                .or_insert(0);
            *games = (*games).max(score.games_counted);
        }

        for ((user_id, _), games) in &round_games {
            if let Some(summary) = by_user.get_mut(user_id) {
                summary.games_counted += games;
            }
        }

        let mut summaries: Vec<UserFantasySummary> = by_user.into_values().collect();
        for summary in &mut summaries {
            if summary.games_counted > 0 {
                summary.average_score = summary.total_score / f64::from(summary.games_counted);
            }
        }

        summaries.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        for (i, summary) in summaries.iter_mut().enumerate() {
            summary.rank = (i + 1) as u32;
        }

        let outcome = LeaderboardOutcome {
            users_ranked: summaries.len(),
        };
        self.store.replace_summaries(summaries).await?;
        debug!(users = outcome.users_ranked, "leaderboard recomputed");
        Ok(outcome)
    }
}
