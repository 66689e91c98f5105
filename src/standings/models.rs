use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadToHead {
    Win,
    Loss,
    Draw,
}

/// One row of a group table. The whole table is recomputed from completed
/// matches on every change; rows are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: String,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Games won across the group stage; each game in a series is a point.
    pub points: u32,
    /// Games won minus games lost.
    pub score_diff: i32,
    pub head_to_head: HashMap<String, HeadToHead>,
}

impl TeamStanding {
    pub fn zeroed(team_id: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            matches_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,
            score_diff: 0,
            head_to_head: HashMap::new(),
        }
    }

    pub fn beat(&self, other_team_id: &str) -> bool {
        matches!(self.head_to_head.get(other_team_id), Some(HeadToHead::Win))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub team_ids: Vec<String>,
    pub standings: Vec<TeamStanding>,
}
