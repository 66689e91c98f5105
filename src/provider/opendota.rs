use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{ProviderError, RawGameStats, StatsProvider};

const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// OpenDota match endpoint client. Rate limited upstream, so every failure
/// that is not a decode error is treated as retryable by the queue.
pub struct OpenDotaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenDotaClient {
    pub fn new(api_key: Option<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("dotacup")
            .build()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(std::env::var("OPENDOTA_API_KEY").ok())
    }
}

#[async_trait]
impl StatsProvider for OpenDotaClient {
    async fn fetch_game_stats(&self, opendota_match_id: i64) -> Result<RawGameStats, ProviderError> {
        let url = format!("{}/matches/{}", self.base_url, opendota_match_id);
        debug!(opendota_match_id, "fetching match from OpenDota");

        let mut request = self.http.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http(status.as_u16()));
        }

        response
            .json::<RawGameStats>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
