use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonStats {
    pub team_id: String,
    pub matches_played: u32,
    pub match_wins: u32,
    pub match_draws: u32,
    pub match_losses: u32,
    pub game_wins: u32,
    pub game_losses: u32,
    pub kills: u32,
    pub deaths: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonStats {
    pub player_id: String,
    pub games: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub last_hits: u32,
    pub denies: u32,
    pub hero_damage: u64,
    pub tower_damage: u64,
    pub hero_healing: u64,
    pub obs_placed: u32,
    pub sen_placed: u32,
    pub avg_gpm: f64,
    pub avg_xpm: f64,
    /// Single-game bests.
    pub best_kills: u32,
    pub best_gpm: u32,
    pub best_hero_damage: u32,
    pub best_last_hits: u32,
}

/// Season-wide aggregates. Always rebuilt in full; a partial rebuild would
/// drift the moment an incremental update was missed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveStats {
    pub generated_at: DateTime<Utc>,
    pub matches_counted: usize,
    pub games_counted: usize,
    pub teams: Vec<TeamSeasonStats>,
    pub players: Vec<PlayerSeasonStats>,
}
