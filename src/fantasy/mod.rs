pub mod models;
pub mod repository;
pub mod scoring;
pub mod service;

pub use models::{FantasyLineup, FantasyRoundScore, ScoreBreakdown};
pub use repository::{FantasyStore, InMemoryFantasyStore};
pub use scoring::{score_game, PlayerGameScore};
pub use service::{FantasyEngine, RoundScoringOutcome};
