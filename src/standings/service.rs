use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::shared::StoreError;
use crate::tournament::models::Match;
use crate::tournament::MatchStore;

use super::models::{HeadToHead, TeamStanding};
use super::repository::GroupStore;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StandingsOutcome {
    pub matches_processed: usize,
    /// Completed matches skipped for integrity reasons (missing team,
    /// inconsistent winner).
    pub skipped: usize,
}

/// Recomputes one group's table as a pure function of its completed matches.
#[derive(Clone)]
pub struct StandingsAggregator {
    matches: Arc<dyn MatchStore>,
    groups: Arc<dyn GroupStore>,
}

impl StandingsAggregator {
    pub fn new(matches: Arc<dyn MatchStore>, groups: Arc<dyn GroupStore>) -> Self {
        Self { matches, groups }
    }

    pub async fn recompute_group(&self, group_id: &str) -> Result<StandingsOutcome, StoreError> {
        let group = self
            .groups
            .get_group(group_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("group {group_id}")))?;

        let mut table: BTreeMap<String, TeamStanding> = group
            .team_ids
            .iter()
            .map(|id| (id.clone(), TeamStanding::zeroed(id.clone())))
            .collect();

        let mut outcome = StandingsOutcome::default();
        for m in self.matches.list_group_matches(group_id).await? {
            if !m.is_completed() {
                continue;
            }
            match fold_match(&mut table, &m) {
                Ok(()) => outcome.matches_processed += 1,
                Err(reason) => {
                    warn!(match_id = %m.id, %reason, "skipping match with bad data");
                    outcome.skipped += 1;
                }
            }
        }

        let mut rows: Vec<TeamStanding> = table.into_values().collect();
        sort_standings(&mut rows);
        self.groups.write_standings(group_id, rows).await?;

        debug!(
            group_id,
            processed = outcome.matches_processed,
            skipped = outcome.skipped,
            "group standings recomputed"
        );
        Ok(outcome)
    }
}

fn fold_match(table: &mut BTreeMap<String, TeamStanding>, m: &Match) -> Result<(), String> {
    let team_a = m
        .side_a
        .team
        .as_ref()
        .ok_or_else(|| "side A has no team".to_string())?;
    let team_b = m
        .side_b
        .team
        .as_ref()
        .ok_or_else(|| "side B has no team".to_string())?;
    let (score_a, score_b) = (u32::from(m.side_a.score), u32::from(m.side_b.score));

    if score_a != score_b {
        let computed_winner = if score_a > score_b { team_a } else { team_b };
        match m.winner_id.as_deref() {
            Some(id) if id == computed_winner.id => {}
            Some(id) => return Err(format!("winner {id} inconsistent with score")),
            None => return Err("completed without a winner".to_string()),
        }
    }

    let a_id = team_a.id.clone();
    let b_id = team_b.id.clone();

    {
        let row = table.entry(a_id.clone()).or_insert_with(|| TeamStanding::zeroed(&a_id));
        row.matches_played += 1;
        row.points += score_a;
        row.score_diff += score_a as i32 - score_b as i32;
    }
    {
        let row = table.entry(b_id.clone()).or_insert_with(|| TeamStanding::zeroed(&b_id));
        row.matches_played += 1;
        row.points += score_b;
        row.score_diff += score_b as i32 - score_a as i32;
    }

    if score_a == score_b {
        for (id, opponent) in [(&a_id, &b_id), (&b_id, &a_id)] {
            if let Some(row) = table.get_mut(id.as_str()) {
                row.draws += 1;
                row.head_to_head.insert(opponent.to_string(), HeadToHead::Draw);
            }
        }
    } else {
        let (winner, loser) = if score_a > score_b {
            (a_id, b_id)
        } else {
            (b_id, a_id)
        };
        if let Some(row) = table.get_mut(&winner) {
            row.wins += 1;
            row.head_to_head.insert(loser.clone(), HeadToHead::Win);
        }
        if let Some(row) = table.get_mut(&loser) {
            row.losses += 1;
            row.head_to_head.insert(winner.clone(), HeadToHead::Loss);
        }
    }

    Ok(())
}

/// Strict total order: wins desc, then head-to-head for exactly-two-way win
/// ties, then score differential desc, then team id.
fn sort_standings(rows: &mut [TeamStanding]) {
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.score_diff.cmp(&a.score_diff))
            .then(a.team_id.cmp(&b.team_id))
    });

    // head-to-head only decides ties between exactly two teams
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len() && rows[end].wins == rows[start].wins {
            end += 1;
        }
        if end - start == 2 {
            let lower_beat_upper = rows[start + 1].beat(&rows[start].team_id);
            if lower_beat_upper {
                rows.swap(start, start + 1);
            }
        }
        start = end;
    }
}
