pub mod models;
pub mod repository;
pub mod service;

pub use models::UnparsedGame;
pub use repository::{InMemoryUnparsedQueue, UnparsedQueue};
pub use service::{QueueEntryStatus, QueueStatus, RetryReport, UnparsedGameService};
