use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use crate::shared::StoreError;
use crate::tournament::MatchStore;

use super::models::{ComprehensiveStats, PlayerSeasonStats, TeamSeasonStats};
use super::repository::SeasonStatsStore;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonOutcome {
    pub matches_counted: usize,
    pub games_counted: usize,
    pub skipped_unparsed: usize,
    pub teams: usize,
    pub players: usize,
}

/// Rebuilds the season-wide team and player aggregates from scratch. There is
/// no incremental path on purpose; a full pass over every completed match is
/// the only way the document stays correct after retroactive corrections.
#[derive(Clone)]
pub struct SeasonStatsCalculator {
    matches: Arc<dyn MatchStore>,
    store: Arc<dyn SeasonStatsStore>,
}

impl SeasonStatsCalculator {
    pub fn new(matches: Arc<dyn MatchStore>, store: Arc<dyn SeasonStatsStore>) -> Self {
        Self { matches, store }
    }

    pub async fn recompute_all(&self) -> Result<SeasonOutcome, StoreError> {
        let teams = self.matches.list_teams().await?;
        let players = self.matches.list_players().await?;

        let mut team_stats: BTreeMap<String, TeamSeasonStats> = teams
            .iter()
            .map(|t| {
                (
                    t.id.clone(),
                    TeamSeasonStats {
                        team_id: t.id.clone(),
                        ..TeamSeasonStats::default()
                    },
                )
            })
            .collect();
        let mut player_stats: BTreeMap<String, PlayerSeasonStats> = players
            .iter()
            .map(|p| {
                (
                    p.id.clone(),
                    PlayerSeasonStats {
                        player_id: p.id.clone(),
                        ..PlayerSeasonStats::default()
                    },
                )
            })
            .collect();
        // row attribution goes through the roster's account ids
        let by_account: BTreeMap<i64, (String, String)> = players
            .iter()
            .map(|p| (p.account_id, (p.id.clone(), p.team_id.clone())))
            .collect();

        let mut gpm_sums: BTreeMap<String, u64> = BTreeMap::new();
        let mut xpm_sums: BTreeMap<String, u64> = BTreeMap::new();

        let mut matches_counted = 0usize;
        let mut games_counted = 0usize;
        let mut skipped_unparsed = 0usize;

        for m in self.matches.list_matches().await? {
            if !m.is_completed() {
                continue;
            }
            matches_counted += 1;

            for (side, other) in [(&m.side_a, &m.side_b), (&m.side_b, &m.side_a)] {
                let Some(team) = side.team.as_ref() else {
                    continue;
                };
                let Some(stats) = team_stats.get_mut(&team.id) else {
                    warn!(match_id = %m.id, team_id = %team.id, "match references unknown team");
                    continue;
                };
                stats.matches_played += 1;
                stats.game_wins += u32::from(side.score);
                stats.game_losses += u32::from(other.score);
                if m.is_draw() {
                    stats.match_draws += 1;
                } else if m.winner_id.as_deref() == Some(team.id.as_str()) {
                    stats.match_wins += 1;
                } else {
                    stats.match_losses += 1;
                }
            }

            for game in self.matches.list_match_games(&m.id).await? {
                let Some(raw) = game.stats else {
                    skipped_unparsed += 1;
                    continue;
                };
                games_counted += 1;

                for row in &raw.players {
                    let Some((player_id, team_id)) =
                        row.account_id.and_then(|id| by_account.get(&id)).cloned()
                    else {
                        continue;
                    };

                    if let Some(team) = team_stats.get_mut(&team_id) {
                        team.kills += row.kills;
                        team.deaths += row.deaths;
                    }

                    let Some(stats) = player_stats.get_mut(&player_id) else {
                        continue;
                    };
                    stats.games += 1;
                    stats.kills += row.kills;
                    stats.deaths += row.deaths;
                    stats.assists += row.assists;
                    stats.last_hits += row.last_hits;
                    stats.denies += row.denies;
                    stats.hero_damage += u64::from(row.hero_damage);
                    stats.tower_damage += u64::from(row.tower_damage);
                    stats.hero_healing += u64::from(row.hero_healing);
                    stats.obs_placed += row.obs_placed;
                    stats.sen_placed += row.sen_placed;
                    stats.best_kills = stats.best_kills.max(row.kills);
                    stats.best_gpm = stats.best_gpm.max(row.gold_per_min);
                    stats.best_hero_damage = stats.best_hero_damage.max(row.hero_damage);
                    stats.best_last_hits = stats.best_last_hits.max(row.last_hits);
                    *gpm_sums.entry(player_id.clone()).or_insert(0) +=
                        u64::from(row.gold_per_min);
                    *xpm_sums.entry(player_id).or_insert(0) += u64::from(row.xp_per_min);
                }
            }
        }

        for (player_id, stats) in &mut player_stats {
            if stats.games > 0 {
                let games = f64::from(stats.games);
                stats.avg_gpm = gpm_sums.get(player_id).copied().unwrap_or(0) as f64 / games;
                stats.avg_xpm = xpm_sums.get(player_id).copied().unwrap_or(0) as f64 / games;
            }
        }

        let outcome = SeasonOutcome {
            matches_counted,
            games_counted,
            skipped_unparsed,
            teams: team_stats.len(),
            players: player_stats.len(),
        };

        self.store
            .replace(ComprehensiveStats {
                generated_at: Utc::now(),
                matches_counted,
                games_counted,
                teams: team_stats.into_values().collect(),
                players: player_stats.into_values().collect(),
            })
            .await?;

        debug!(
            matches = outcome.matches_counted,
            games = outcome.games_counted,
            skipped = outcome.skipped_unparsed,
            "season stats rebuilt"
        );
        Ok(outcome)
    }
}
