// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus configuration
//!
//! Retry settings and logging toggle, loadable from TOML:
//!
//! ```toml
//! max_retries = 2
//! retry_delay = "100ms"
//! enable_logging = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 100;

/// Upper bound on `retry_delay` (five minutes)
pub const RETRY_DELAY_LIMIT: Duration = Duration::from_millis(300_000);

/// Errors raised while building or validating a bus configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_retries {value} exceeds the limit of {max}")]
    MaxRetriesTooHigh { value: u32, max: u32 },
    #[error("retry_delay {value:?} exceeds the limit of {max:?}")]
    RetryDelayTooLong { value: Duration, max: Duration },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Dispatch configuration for an event bus
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    /// Retries per handler after its first failed attempt
    pub max_retries: u32,
    /// Fixed pause between a failed attempt and the next one
    #[serde(with = "humantime_serde")]
    pub retry_delay: Duration,
    /// Report handler attempts to the injected logger
    pub enable_logging: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_delay: Duration::ZERO,
            enable_logging: true,
        }
    }
}

impl BusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check the retry settings against their limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::MaxRetriesTooHigh {
                value: self.max_retries,
                max: MAX_RETRIES_LIMIT,
            });
        }
        if self.retry_delay > RETRY_DELAY_LIMIT {
            return Err(ConfigError::RetryDelayTooLong {
                value: self.retry_delay,
                max: RETRY_DELAY_LIMIT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
