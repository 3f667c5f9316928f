//! Configuration types for solo block production

use crate::error::{Result, SoloError};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable overriding the production interval (seconds)
pub const GEN_BLOCK_TIME_ENV: &str = "SOLO_GEN_BLOCK_TIME";

/// Runtime configuration for solo block production
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SoloConfig {
    /// Seconds between production attempts (default: 6)
    pub gen_block_time_secs: u64,
}

impl Default for SoloConfig {
    fn default() -> Self {
        Self {
            gen_block_time_secs: crate::DEFAULT_GEN_BLOCK_TIME.as_secs(),
        }
    }
}

impl SoloConfig {
    /// Config with the given production interval in seconds.
    pub fn with_gen_block_time_secs(gen_block_time_secs: u64) -> Self {
        Self {
            gen_block_time_secs,
        }
    }

    /// Load defaults, overridden by `SOLO_GEN_BLOCK_TIME` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(GEN_BLOCK_TIME_ENV) {
            config.gen_block_time_secs = value.trim().parse().map_err(|e| {
                SoloError::InvalidConfig(format!("{GEN_BLOCK_TIME_ENV}={value:?}: {e}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.gen_block_time_secs == 0 {
            return Err(SoloError::InvalidConfig(
                "gen_block_time_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Production interval.
    pub fn gen_block_time(&self) -> Duration {
        Duration::from_secs(self.gen_block_time_secs)
    }
}
