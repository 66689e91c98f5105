pub mod models;
pub mod repository;
pub mod service;

pub use models::UserFantasySummary;
pub use repository::{InMemoryLeaderboardStore, LeaderboardStore};
pub use service::{LeaderboardAggregator, LeaderboardOutcome};
