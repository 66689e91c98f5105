// Library crate for the tournament recalculation engine
// This file exposes the public API for integration tests

pub mod bracket;
pub mod config;
pub mod fantasy;
pub mod leaderboard;
pub mod provider;
pub mod recalc;
pub mod season;
pub mod shared;
pub mod standings;
pub mod tournament;
pub mod unparsed;

// Re-export commonly used types for easier access in tests
pub use config::EngineConfig;
pub use recalc::{admin_router, RecalcOrchestrator, RecalcReport, Stage};
pub use shared::{AppError, AppState, StoreError};
pub use tournament::{InMemoryMatchStore, MatchStore};
