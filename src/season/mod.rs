pub mod models;
pub mod repository;
pub mod service;

pub use models::{ComprehensiveStats, PlayerSeasonStats, TeamSeasonStats};
pub use repository::{InMemorySeasonStatsStore, SeasonStatsStore};
pub use service::{SeasonOutcome, SeasonStatsCalculator};
