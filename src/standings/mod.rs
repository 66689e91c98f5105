pub mod models;
pub mod repository;
pub mod service;

pub use models::{Group, HeadToHead, TeamStanding};
pub use repository::{GroupStore, InMemoryGroupStore};
pub use service::{StandingsAggregator, StandingsOutcome};
