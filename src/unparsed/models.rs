use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A game whose raw payload has not yet been retrieved from the stats
/// provider. Keyed by the external match id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnparsedGame {
    pub opendota_match_id: i64,
    pub game_id: String,
    pub match_id: String,
    pub game_number: u8,
    pub radiant_team: String,
    pub dire_team: String,
    pub created_at: DateTime<Utc>,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub attempt_count: u32,
}

impl UnparsedGame {
    /// Retries are used up; the entry stays queued so it keeps being
    /// reported, it is just no longer attempted.
    pub fn exhausted(&self, max_attempts: u32) -> bool {
        self.attempt_count >= max_attempts
    }

    /// Whether enough time has passed since the last attempt.
    pub fn due(&self, now: DateTime<Utc>, min_interval: Duration) -> bool {
        match self.last_attempt_at {
            Some(last) => now - last >= min_interval,
            None => true,
        }
    }
}
