use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shared::StoreError;

use super::models::{Game, Match, MatchStatus, Player, Side, Team, TeamRef};

/// Source-of-truth store for match and game facts. Everything derived
/// (standings, brackets, fantasy, leaderboards, season stats) lives behind
/// its own store and is written only by the recalculation services.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn upsert_match(&self, m: Match) -> Result<(), StoreError>;
    async fn get_match(&self, id: &str) -> Result<Option<Match>, StoreError>;
    async fn list_matches(&self) -> Result<Vec<Match>, StoreError>;
    async fn list_group_matches(&self, group_id: &str) -> Result<Vec<Match>, StoreError>;
    async fn list_round_matches(&self, round_id: &str) -> Result<Vec<Match>, StoreError>;

    /// Assigns a team to one side of a not-yet-completed match. Used by the
    /// bracket resolver when a feeder slot decides.
    async fn set_match_side(
        &self,
        match_id: &str,
        side: Side,
        team: Option<TeamRef>,
    ) -> Result<(), StoreError>;

    async fn upsert_game(&self, g: Game) -> Result<(), StoreError>;
    async fn get_game(&self, id: &str) -> Result<Option<Game>, StoreError>;
    async fn list_match_games(&self, match_id: &str) -> Result<Vec<Game>, StoreError>;

    async fn upsert_team(&self, team: Team) -> Result<(), StoreError>;
    async fn list_teams(&self) -> Result<Vec<Team>, StoreError>;
    async fn upsert_player(&self, player: Player) -> Result<(), StoreError>;
    async fn list_players(&self) -> Result<Vec<Player>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: Arc<RwLock<HashMap<String, Match>>>,
    games: Arc<RwLock<HashMap<String, Game>>>,
    teams: Arc<RwLock<HashMap<String, Team>>>,
    players: Arc<RwLock<HashMap<String, Player>>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_id<T, F: Fn(&T) -> &str>(mut items: Vec<T>, key: F) -> Vec<T> {
    items.sort_by(|a, b| key(a).cmp(key(b)));
    items
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn upsert_match(&self, m: Match) -> Result<(), StoreError> {
        m.validate()?;
        let mut matches = self.matches.write().await;
        matches.insert(m.id.clone(), m);
        Ok(())
    }

    async fn get_match(&self, id: &str) -> Result<Option<Match>, StoreError> {
        let matches = self.matches.read().await;
        Ok(matches.get(id).cloned())
    }

    async fn list_matches(&self) -> Result<Vec<Match>, StoreError> {
        let matches = self.matches.read().await;
        Ok(sorted_by_id(matches.values().cloned().collect(), |m| &m.id))
    }

    async fn list_group_matches(&self, group_id: &str) -> Result<Vec<Match>, StoreError> {
        let matches = self.matches.read().await;
        Ok(sorted_by_id(
            matches
                .values()
                .filter(|m| m.group_id.as_deref() == Some(group_id))
                .cloned()
                .collect(),
            |m| &m.id,
        ))
    }

    async fn list_round_matches(&self, round_id: &str) -> Result<Vec<Match>, StoreError> {
        let matches = self.matches.read().await;
        Ok(sorted_by_id(
            matches
                .values()
                .filter(|m| m.round_id == round_id)
                .cloned()
                .collect(),
            |m| &m.id,
        ))
    }

    async fn set_match_side(
        &self,
        match_id: &str,
        side: Side,
        team: Option<TeamRef>,
    ) -> Result<(), StoreError> {
        let mut matches = self.matches.write().await;
        let m = matches
            .get_mut(match_id)
            .ok_or_else(|| StoreError::NotFound(format!("match {match_id}")))?;
        if m.status == MatchStatus::Completed {
            return Err(StoreError::Validation(format!(
                "match {match_id}: cannot reassign a side of a completed match"
            )));
        }
        match side {
            Side::A => m.side_a.team = team,
            Side::B => m.side_b.team = team,
        }
        Ok(())
    }

    async fn upsert_game(&self, g: Game) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        games.insert(g.id.clone(), g);
        Ok(())
    }

    async fn get_game(&self, id: &str) -> Result<Option<Game>, StoreError> {
        let games = self.games.read().await;
        Ok(games.get(id).cloned())
    }

    async fn list_match_games(&self, match_id: &str) -> Result<Vec<Game>, StoreError> {
        let games = self.games.read().await;
        let mut out: Vec<Game> = games
            .values()
            .filter(|g| g.match_id == match_id)
            .cloned()
            .collect();
        out.sort_by_key(|g| g.game_number);
        Ok(out)
    }

    async fn upsert_team(&self, team: Team) -> Result<(), StoreError> {
        let mut teams = self.teams.write().await;
        teams.insert(team.id.clone(), team);
        Ok(())
    }

    async fn list_teams(&self) -> Result<Vec<Team>, StoreError> {
        let teams = self.teams.read().await;
        Ok(sorted_by_id(teams.values().cloned().collect(), |t| &t.id))
    }

    async fn upsert_player(&self, player: Player) -> Result<(), StoreError> {
        let mut players = self.players.write().await;
        players.insert(player.id.clone(), player);
        Ok(())
    }

    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let players = self.players.read().await;
        Ok(sorted_by_id(players.values().cloned().collect(), |p| &p.id))
    }
}
