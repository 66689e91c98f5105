pub mod models;
pub mod repository;
pub mod service;

pub use models::{BracketSlot, Feeder, PlayoffBracket};
pub use repository::{BracketStore, InMemoryBracketStore};
pub use service::{BracketOutcome, BracketResolver};
