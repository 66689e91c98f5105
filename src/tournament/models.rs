use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::provider::models::RawGameStats;
use crate::shared::StoreError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

/// Best-of-N series rule for one match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SeriesFormat {
    Bo1,
    Bo2,
    Bo3,
    Bo5,
}

impl SeriesFormat {
    pub fn max_games(self) -> u8 {
        match self {
            SeriesFormat::Bo1 => 1,
            SeriesFormat::Bo2 => 2,
            SeriesFormat::Bo3 => 3,
            SeriesFormat::Bo5 => 5,
        }
    }

    pub fn games_to_win(self) -> u8 {
        match self {
            SeriesFormat::Bo1 => 1,
            SeriesFormat::Bo2 => 2,
            SeriesFormat::Bo3 => 2,
            SeriesFormat::Bo5 => 3,
        }
    }

    /// Bo2 is the only format that can end level.
    pub fn allows_draw(self) -> bool {
        matches!(self, SeriesFormat::Bo2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

/// One side of a match. Bracket matches start with no team assigned; the
/// bracket resolver fills the side in once the feeding slot is decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSide {
    pub team: Option<TeamRef>,
    pub score: u8,
}

impl MatchSide {
    pub fn empty() -> Self {
        Self {
            team: None,
            score: 0,
        }
    }

    pub fn seeded(team: TeamRef) -> Self {
        Self {
            team: Some(team),
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub round_id: String,
    pub group_id: Option<String>,
    pub series_format: SeriesFormat,
    pub side_a: MatchSide,
    pub side_b: MatchSide,
    pub status: MatchStatus,
    pub winner_id: Option<String>,
    /// Constituent games in play order.
    pub game_ids: Vec<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn is_draw(&self) -> bool {
        self.is_completed() && self.side_a.score == self.side_b.score
    }

    pub fn winner(&self) -> Option<&TeamRef> {
        let winner_id = self.winner_id.as_deref()?;
        [&self.side_a, &self.side_b]
            .into_iter()
            .find_map(|side| side.team.as_ref().filter(|t| t.id == winner_id))
    }

    pub fn loser(&self) -> Option<&TeamRef> {
        let winner_id = self.winner_id.as_deref()?;
        [&self.side_a, &self.side_b]
            .into_iter()
            .find_map(|side| side.team.as_ref().filter(|t| t.id != winner_id))
    }

    pub fn side_for(&self, team_id: &str) -> Option<&MatchSide> {
        [&self.side_a, &self.side_b]
            .into_iter()
            .find(|side| side.team.as_ref().is_some_and(|t| t.id == team_id))
    }

    /// Boundary validation for the match invariants. Runs on every store
    /// write so malformed facts never reach the recalculation services.
    pub fn validate(&self) -> Result<(), StoreError> {
        let to_win = self.series_format.games_to_win();
        if self.side_a.score > to_win || self.side_b.score > to_win {
            return Err(StoreError::Validation(format!(
                "match {}: score {}-{} exceeds {} games to win",
                self.id, self.side_a.score, self.side_b.score, to_win
            )));
        }

        if self.game_ids.len() > usize::from(self.series_format.max_games()) {
            return Err(StoreError::Validation(format!(
                "match {}: {} games recorded for a {}",
                self.id,
                self.game_ids.len(),
                self.series_format
            )));
        }

        if self.is_completed() {
            let drawn = self.side_a.score == self.side_b.score;
            if drawn {
                if !self.series_format.allows_draw() {
                    return Err(StoreError::Validation(format!(
                        "match {}: drawn score {}-{} is impossible in a {}",
                        self.id, self.side_a.score, self.side_b.score, self.series_format
                    )));
                }
                if self.winner_id.is_some() {
                    return Err(StoreError::Validation(format!(
                        "match {}: drawn match must not carry a winner",
                        self.id
                    )));
                }
            } else {
                let Some(winner_id) = self.winner_id.as_deref() else {
                    return Err(StoreError::Validation(format!(
                        "match {}: completed without a winner",
                        self.id
                    )));
                };
                let expected = if self.side_a.score > self.side_b.score {
                    &self.side_a
                } else {
                    &self.side_b
                };
                match expected.team.as_ref() {
                    Some(team) if team.id == winner_id => {}
                    Some(team) => {
                        return Err(StoreError::Validation(format!(
                            "match {}: winner {} does not match leading team {}",
                            self.id, winner_id, team.id
                        )));
                    }
                    None => {
                        return Err(StoreError::Validation(format!(
                            "match {}: completed with an unassigned side",
                            self.id
                        )));
                    }
                }
            }
        } else if self.winner_id.is_some() {
            return Err(StoreError::Validation(format!(
                "match {}: winner set while status is {}",
                self.id, self.status
            )));
        }

        Ok(())
    }
}

/// One game of a series. `stats` is the parse state: `None` until the raw
/// payload has been fetched from the stats provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub match_id: String,
    pub opendota_match_id: i64,
    pub game_number: u8,
    pub stats: Option<RawGameStats>,
}

impl Game {
    pub fn is_parsed(&self) -> bool {
        self.stats.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// Player role, used by the fantasy weight table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Carry,
    Mid,
    Offlane,
    SoftSupport,
    HardSupport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team_id: String,
    pub role: Role,
    /// 32-bit Steam account id, matched against provider rows.
    pub account_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str) -> TeamRef {
        TeamRef {
            id: id.to_string(),
            name: id.to_uppercase(),
        }
    }

    fn completed_match(score_a: u8, score_b: u8, winner: Option<&str>) -> Match {
        Match {
            id: "m1".into(),
            round_id: "r1".into(),
            group_id: Some("g1".into()),
            series_format: SeriesFormat::Bo3,
            side_a: MatchSide {
                team: Some(team("alpha")),
                score: score_a,
            },
            side_b: MatchSide {
                team: Some(team("beta")),
                score: score_b,
            },
            status: MatchStatus::Completed,
            winner_id: winner.map(str::to_string),
            game_ids: vec!["g1a".into(), "g1b".into(), "g1c".into()],
            scheduled_at: None,
        }
    }

    #[test]
    fn completed_match_with_consistent_winner_is_valid() {
        let m = completed_match(2, 1, Some("alpha"));
        assert!(m.validate().is_ok());
        assert_eq!(m.winner().unwrap().id, "alpha");
        assert_eq!(m.loser().unwrap().id, "beta");
    }

    #[test]
    fn completed_match_without_winner_is_rejected() {
        let m = completed_match(2, 0, None);
        assert!(matches!(m.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn winner_must_match_leading_side() {
        let m = completed_match(2, 1, Some("beta"));
        assert!(matches!(m.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn score_cannot_exceed_series_games_to_win() {
        let m = completed_match(3, 0, Some("alpha"));
        assert!(matches!(m.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn draw_only_allowed_in_bo2() {
        let mut m = completed_match(1, 1, None);
        assert!(m.validate().is_err());

        m.series_format = SeriesFormat::Bo2;
        m.game_ids.truncate(2);
        assert!(m.validate().is_ok());
        assert!(m.is_draw());
    }

    #[test]
    fn scheduled_match_cannot_carry_winner() {
        let mut m = completed_match(0, 0, Some("alpha"));
        m.status = MatchStatus::Scheduled;
        assert!(matches!(m.validate(), Err(StoreError::Validation(_))));
    }
}
