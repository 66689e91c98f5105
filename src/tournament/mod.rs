pub mod models;
pub mod repository;

pub use models::{Game, Match, MatchSide, MatchStatus, Player, Role, SeriesFormat, Side, Team, TeamRef};
pub use repository::{InMemoryMatchStore, MatchStore};
