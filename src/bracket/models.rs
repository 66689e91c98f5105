use serde::{Deserialize, Serialize};

use crate::tournament::models::TeamRef;

/// Where a slot's participant comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Feeder {
    /// Winner of another slot.
    Slot { slot_id: String },
    /// Team seeded directly into the bracket.
    Seed { team: TeamRef },
    /// No opponent; the other feeder advances unopposed.
    Bye,
}

/// One node of the elimination tree. `winner` is derived state: the resolver
/// clears and recomputes it on every pass, so it can never go stale after a
/// retroactive match correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub id: String,
    /// 1 = leaves. Slots are resolved in ascending round order.
    pub round: u32,
    /// Match played in this slot, once both participants are known.
    pub match_id: Option<String>,
    pub feeders: [Feeder; 2],
    pub winner: Option<TeamRef>,
}

impl BracketSlot {
    pub fn new(id: impl Into<String>, round: u32, match_id: Option<String>, feeders: [Feeder; 2]) -> Self {
        Self {
            id: id.into(),
            round,
            match_id,
            feeders,
            winner: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffBracket {
    pub id: String,
    pub name: String,
    pub slots: Vec<BracketSlot>,
}

impl PlayoffBracket {
    pub fn slot(&self, slot_id: &str) -> Option<&BracketSlot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    pub fn references_match(&self, match_id: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.match_id.as_deref() == Some(match_id))
    }
}
