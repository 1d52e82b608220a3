//! Editor configuration.

use std::time::Duration;

use piecewise_core::{DataRange, FALLBACK_DATA_RANGE};
use serde::Deserialize;

use crate::error::ConfigError;

/// Default trailing-edge delay before a burst of edits is dispatched.
pub const DEFAULT_UPDATE_DELAY: Duration = Duration::from_millis(300);

const UPDATE_DELAY_VAR: &str = "PIECEWISE_UPDATE_DELAY_MS";
const FALLBACK_RANGE_VAR: &str = "PIECEWISE_FALLBACK_RANGE";

/// Runtime configuration for a [`crate::PiecewiseEditor`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period after the last widget update before dispatching.
    #[serde(rename = "update_delay_ms", with = "millis")]
    pub update_delay: Duration,
    /// Range used when the selected component has no recorded bounds.
    pub fallback_range: DataRange,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            update_delay: DEFAULT_UPDATE_DELAY,
            fallback_range: FALLBACK_DATA_RANGE,
        }
    }
}

impl EditorConfig {
    /// Defaults overridden by `PIECEWISE_UPDATE_DELAY_MS` and
    /// `PIECEWISE_FALLBACK_RANGE` (`"min,max"`) when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`EditorConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(UPDATE_DELAY_VAR) {
            config.update_delay = parse_delay(UPDATE_DELAY_VAR, &value)?;
        }
        if let Some(value) = lookup(FALLBACK_RANGE_VAR) {
            config.fallback_range = parse_range(FALLBACK_RANGE_VAR, &value)?;
        }
        Ok(config)
    }
}

fn parse_delay(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidDelay {
            var,
            value: value.to_string(),
        })
}

fn parse_range(var: &'static str, value: &str) -> Result<DataRange, ConfigError> {
    let malformed = || ConfigError::MalformedRange {
        var,
        value: value.to_string(),
    };
    let (min, max) = value.split_once(',').ok_or_else(malformed)?;
    let min: f64 = min.trim().parse().map_err(|_| malformed())?;
    let max: f64 = max.trim().parse().map_err(|_| malformed())?;
    Ok(DataRange::try_new(min, max)?)
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
