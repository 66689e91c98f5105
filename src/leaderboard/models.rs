use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Season totals for one fantasy user, derived solely from that user's
/// FantasyRoundScore entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFantasySummary {
    pub user_id: String,
    pub round_totals: BTreeMap<String, f64>,
    pub total_score: f64,
    pub games_counted: u32,
    /// Average points per game, for fair comparison across game counts.
    pub average_score: f64,
    /// 1-based; ties are broken by user id, so ranks are strict.
    pub rank: u32,
}
