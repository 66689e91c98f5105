use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::shared::StoreError;
use crate::tournament::models::{MatchStatus, Side, TeamRef};
use crate::tournament::MatchStore;

use super::models::{Feeder, PlayoffBracket};
use super::repository::BracketStore;

#[derive(Debug, Clone, Default, Serialize)]
pub struct BracketOutcome {
    pub slots_resolved: usize,
    pub slots_pending: usize,
    /// Next-round matches whose sides were (re)assigned this pass.
    pub matches_updated: usize,
    /// Slots skipped for integrity reasons.
    pub skipped: usize,
}

/// Feeder state while walking the tree.
enum Participant {
    Undecided,
    /// Decided with a team, or decided as a bye (no team).
    Decided(Option<TeamRef>),
}

/// Resolves an elimination tree from its leaves. Never trusts previously
/// cached slot winners: every pass clears them and recomputes from current
/// match state, which is what makes retroactive corrections propagate.
#[derive(Clone)]
pub struct BracketResolver {
    matches: Arc<dyn MatchStore>,
    brackets: Arc<dyn BracketStore>,
}

impl BracketResolver {
    pub fn new(matches: Arc<dyn MatchStore>, brackets: Arc<dyn BracketStore>) -> Self {
        Self { matches, brackets }
    }

    pub async fn recompute_bracket(&self, bracket_id: &str) -> Result<BracketOutcome, StoreError> {
        let mut bracket = self
            .brackets
            .get_bracket(bracket_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("bracket {bracket_id}")))?;

        for slot in &mut bracket.slots {
            slot.winner = None;
        }

        let mut order: Vec<usize> = (0..bracket.slots.len()).collect();
        order.sort_by(|&a, &b| {
            let (sa, sb) = (&bracket.slots[a], &bracket.slots[b]);
            sa.round.cmp(&sb.round).then(sa.id.cmp(&sb.id))
        });

        let mut outcome = BracketOutcome::default();
        let mut decided: HashMap<String, Option<TeamRef>> = HashMap::new();

        for idx in order {
            let slot = bracket.slots[idx].clone();
            let participants = [
                self.feeder_state(&slot.feeders[0], &decided),
                self.feeder_state(&slot.feeders[1], &decided),
            ];

            // advance decided teams into the slot's match one side at a time
            if let Some(match_id) = slot.match_id.as_deref() {
                for (i, participant) in participants.iter().enumerate() {
                    if let Participant::Decided(Some(team)) = participant {
                        let side = if i == 0 { Side::A } else { Side::B };
                        match self.sync_side(match_id, side, team).await? {
                            SideSync::Updated => outcome.matches_updated += 1,
                            SideSync::Unchanged => {}
                            SideSync::Conflict => {
                                warn!(
                                    slot_id = %slot.id,
                                    match_id,
                                    team_id = %team.id,
                                    "completed match disagrees with corrected feeder"
                                );
                                outcome.skipped += 1;
                            }
                        }
                    }
                }
            }

            let winner = match participants {
                [Participant::Decided(a), Participant::Decided(b)] => {
                    match (a, b) {
                        (Some(team), None) | (None, Some(team)) => Some(team),
                        (None, None) => {
                            warn!(slot_id = %slot.id, "slot fed by two byes");
                            outcome.skipped += 1;
                            None
                        }
                        (Some(_), Some(_)) => self.match_winner(&slot.id, slot.match_id.as_deref()).await?,
                    }
                }
                _ => None,
            };

            if winner.is_some() {
                outcome.slots_resolved += 1;
            } else {
                outcome.slots_pending += 1;
            }
            decided.insert(slot.id.clone(), winner.clone());
            bracket.slots[idx].winner = winner;
        }

        self.brackets.upsert_bracket(bracket).await?;
        debug!(
            bracket_id,
            resolved = outcome.slots_resolved,
            pending = outcome.slots_pending,
            "bracket recomputed"
        );
        Ok(outcome)
    }

    fn feeder_state(
        &self,
        feeder: &Feeder,
        decided: &HashMap<String, Option<TeamRef>>,
    ) -> Participant {
        match feeder {
            Feeder::Seed { team } => Participant::Decided(Some(team.clone())),
            Feeder::Bye => Participant::Decided(None),
            Feeder::Slot { slot_id } => match decided.get(slot_id) {
                Some(Some(team)) => Participant::Decided(Some(team.clone())),
                _ => Participant::Undecided,
            },
        }
    }

    async fn match_winner(
        &self,
        slot_id: &str,
        match_id: Option<&str>,
    ) -> Result<Option<TeamRef>, StoreError> {
        let Some(match_id) = match_id else {
            return Ok(None);
        };
        let Some(m) = self.matches.get_match(match_id).await? else {
            warn!(slot_id, match_id, "slot references unknown match");
            return Ok(None);
        };
        if !m.is_completed() {
            return Ok(None);
        }
        match m.winner() {
            Some(team) => Ok(Some(team.clone())),
            None => {
                warn!(slot_id, match_id, "completed bracket match has no winner");
                Ok(None)
            }
        }
    }

    async fn sync_side(
        &self,
        match_id: &str,
        side: Side,
        team: &TeamRef,
    ) -> Result<SideSync, StoreError> {
        let Some(m) = self.matches.get_match(match_id).await? else {
            warn!(match_id, "slot references unknown match");
            return Ok(SideSync::Unchanged);
        };
        let current = match side {
            Side::A => &m.side_a,
            Side::B => &m.side_b,
        };
        if current.team.as_ref() == Some(team) {
            return Ok(SideSync::Unchanged);
        }
        if m.status == MatchStatus::Completed {
            return Ok(SideSync::Conflict);
        }
        self.matches
            .set_match_side(match_id, side, Some(team.clone()))
            .await?;
        Ok(SideSync::Updated)
    }
}

enum SideSync {
    Updated,
    Unchanged,
    Conflict,
}
