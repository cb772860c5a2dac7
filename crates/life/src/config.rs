//! Startup configuration, deserialized from JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LifeError;

/// Missing fields fall back to [`LifeConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LifeConfig {
    pub width: i32,
    pub height: i32,
    pub wrap: bool,
    /// Probability used by Randomize when the caller does not give one.
    pub fill_probability: f64,
    /// Playback tick period in milliseconds.
    pub interval_ms: u64,
    /// Seed for the randomizer. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            wrap: true,
            fill_probability: 0.3,
            interval_ms: 100,
            seed: None,
        }
    }
}

impl LifeConfig {
    /// Parse and validate.
    ///
    /// # Errors
    /// `Config` for malformed JSON, otherwise whatever [`LifeConfig::validate`] rejects.
    pub fn from_json(json: &str) -> Result<Self, LifeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// `InvalidDimension`, `InvalidProbability` or `InvalidSpeed` for the offending field.
    pub fn validate(&self) -> Result<(), LifeError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(LifeError::InvalidDimension {
                width: i64::from(self.width),
                height: i64::from(self.height),
            });
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(LifeError::InvalidProbability(self.fill_probability));
        }
        if self.interval_ms == 0 {
            return Err(LifeError::InvalidSpeed);
        }
        Ok(())
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
