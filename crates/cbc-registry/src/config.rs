//! Mock source configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Simulated round-trip time of a lookup, in milliseconds.
pub const DEFAULT_LATENCY_MS: u64 = 2000;

const LATENCY_VAR: &str = "CBC_MOCK_LATENCY_MS";
const SEED_VAR: &str = "CBC_MOCK_SEED";

/// Settings for [`crate::MockCitizenSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSourceConfig {
    /// Delay before a lookup answers
    pub latency: Duration,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            seed: None,
        }
    }
}

impl MockSourceConfig {
    /// Read `CBC_MOCK_LATENCY_MS` and `CBC_MOCK_SEED`.
    ///
    /// Unset variables keep their defaults; unparsable values are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LATENCY_VAR) {
            let ms = parse_u64(LATENCY_VAR, &raw)?;
            config.latency = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(SEED_VAR) {
            config.seed = Some(parse_u64(SEED_VAR, &raw)?);
        }

        Ok(config)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn parse_u64(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidVar {
            var,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
