use serde::{Deserialize, Serialize};

/// A user's picked players. Fact data: written by users, read by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyLineup {
    pub user_id: String,
    pub player_ids: Vec<String>,
}

/// Where a player's points came from in a game or round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub gold: f64,
    pub objectives: f64,
    pub win_bonus: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.kills + self.deaths + self.assists + self.gold + self.objectives + self.win_bonus
    }

    pub fn add(&mut self, other: &ScoreBreakdown) {
        self.kills += other.kills;
        self.deaths += other.deaths;
        self.assists += other.assists;
        self.gold += other.gold;
        self.objectives += other.objectives;
        self.win_bonus += other.win_bonus;
    }
}

/// Derived: one user's points from one picked player over one round.
/// Replaced wholesale whenever the round is recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyRoundScore {
    pub user_id: String,
    pub round_id: String,
    pub player_id: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Games of the round that contributed to this entry.
    pub games_counted: u32,
}
