use std::collections::HashMap;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::tournament::models::Role;

/// Per-role weights applied to a player's raw game line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleWeights {
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    /// Points per 1000 gold earned.
    pub gold_per_thousand: f64,
}

/// Fantasy scoring weight table. The exact values are configuration, not
/// code: overriding any field via the config file changes scoring for every
/// subsequent recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub win_bonus: f64,
    pub tower_points: f64,
    pub barracks_points: f64,
    pub roshan_points: f64,
    pub roles: HashMap<Role, RoleWeights>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let mut roles = HashMap::new();
        roles.insert(
            Role::Carry,
            RoleWeights {
                kills: 2.5,
                deaths: -2.5,
                assists: 0.0,
                gold_per_thousand: 1.0,
            },
        );
        roles.insert(
            Role::Mid,
            RoleWeights {
                kills: 2.5,
                deaths: -1.5,
                assists: 1.5,
                gold_per_thousand: 0.0,
            },
        );
        roles.insert(
            Role::Offlane,
            RoleWeights {
                kills: 2.5,
                deaths: -1.5,
                assists: 2.5,
                gold_per_thousand: 0.0,
            },
        );
        roles.insert(
            Role::SoftSupport,
            RoleWeights {
                kills: 1.0,
                deaths: -2.5,
                assists: 3.0,
                gold_per_thousand: 0.0,
            },
        );
        roles.insert(
            Role::HardSupport,
            RoleWeights {
                kills: 1.0,
                deaths: -2.5,
                assists: 5.0,
                gold_per_thousand: 0.0,
            },
        );

        Self {
            win_bonus: 10.0,
            tower_points: 10.0,
            barracks_points: 10.0,
            roshan_points: 20.0,
            roles,
        }
    }
}

impl ScoringConfig {
    /// Weights for a role; a role absent from the table scores nothing from
    /// kills/deaths/assists but still earns team objective bonuses.
    pub fn weights_for(&self, role: Role) -> RoleWeights {
        self.roles.get(&role).copied().unwrap_or_default()
    }
}

/// Bounds for retrying unparsed games against the stats provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub min_retry_interval_secs: i64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            min_retry_interval_secs: 600,
        }
    }
}

impl RetryPolicy {
    pub fn min_interval(&self) -> Duration {
        Duration::seconds(self.min_retry_interval_secs)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub retry: RetryPolicy,
    pub concurrency_limit: ConcurrencyLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConcurrencyLimit(pub usize);

impl Default for ConcurrencyLimit {
    fn default() -> Self {
        Self(4)
    }
}

impl ConcurrencyLimit {
    pub fn get(self) -> usize {
        self.0.max(1)
    }
}

impl EngineConfig {
    /// Loads config from the JSON file named by `DOTACUP_CONFIG`, falling
    /// back to defaults when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("DOTACUP_CONFIG") {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(String, String),

    #[error("failed to parse config file {0}: {1}")]
    Parse(String, String),
}
