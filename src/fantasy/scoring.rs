use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::provider::models::RawGameStats;
use crate::tournament::models::Player;

use super::models::ScoreBreakdown;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerGameScore {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Scores one parsed game. Pure: identical stats, roster and config always
/// produce identical output. Provider rows that match no tournament player
/// are ignored (stand-ins, scrim accounts).
pub fn score_game(
    stats: &RawGameStats,
    roster: &[Player],
    config: &ScoringConfig,
) -> HashMap<String, PlayerGameScore> {
    let by_account: HashMap<i64, &Player> =
        roster.iter().map(|p| (p.account_id, p)).collect();

    let mut scores = HashMap::new();
    for row in &stats.players {
        let Some(account_id) = row.account_id else {
            continue;
        };
        let Some(player) = by_account.get(&account_id) else {
            continue;
        };

        let radiant = row.is_radiant();
        let weights = config.weights_for(player.role);

        let mut breakdown = ScoreBreakdown {
            kills: f64::from(row.kills) * weights.kills,
            deaths: f64::from(row.deaths) * weights.deaths,
            assists: f64::from(row.assists) * weights.assists,
            gold: f64::from(row.gold) / 1000.0 * weights.gold_per_thousand,
            ..ScoreBreakdown::default()
        };
        breakdown.objectives = f64::from(stats.towers_destroyed_by(radiant)) * config.tower_points
            + f64::from(stats.barracks_destroyed_by(radiant)) * config.barracks_points
            + f64::from(stats.roshan_kills_by(radiant)) * config.roshan_points;
        if stats.won_by(radiant) {
            breakdown.win_bonus = config.win_bonus;
        }

        scores.insert(
            player.id.clone(),
            PlayerGameScore {
                score: breakdown.total(),
                breakdown,
            },
        );
    }
    scores
}
