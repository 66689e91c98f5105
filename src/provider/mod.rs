pub mod models;
pub mod opendota;

pub use models::{RawGameStats, RawPlayerStats};
pub use opendota::OpenDotaClient;

use async_trait::async_trait;
use thiserror::Error;

/// External stats provider seam. The engine only ever needs one call: fetch
/// the raw payload for a game by its external match id.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn fetch_game_stats(&self, opendota_match_id: i64) -> Result<RawGameStats, ProviderError>;
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider returned HTTP {0}")]
    Http(u16),

    #[error("failed to decode provider payload: {0}")]
    Decode(String),

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Whether the failure should count as transient. Decode failures and
    /// client errors other than rate limiting are permanent.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Timeout | ProviderError::Unavailable(_) => true,
            ProviderError::Http(status) => *status == 429 || *status >= 500,
            ProviderError::Decode(_) => false,
        }
    }
}
