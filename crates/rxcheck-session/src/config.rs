//! Checker configuration.
//!
//! Every field has a default, so an empty document (or no file at all) gives
//! the stock behaviour.
//!
//! Example:
//! ```toml
//! search_delay_ms = 1500
//! min_query_len = 2
//! suggestion_limit = 5
//! interactions_file = "data/my-interactions.toml"
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use rxcheck_contracts::error::{RxError, RxResult};

pub const DEFAULT_SEARCH_DELAY_MS: u64 = 1500;
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Upper bound on `search_delay_ms`; one minute of simulated latency.
pub const MAX_SEARCH_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// Simulated lookup latency between submit and result.
    pub search_delay_ms: u64,

    /// Minimum trimmed length of both inputs before a search may start.
    /// Also the threshold for showing suggestions. Must be at least 1.
    pub min_query_len: usize,

    /// Maximum number of formulary suggestions shown for one input.
    pub suggestion_limit: usize,

    /// Replaces the embedded interaction table when set.
    pub interactions_file: Option<PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            search_delay_ms: DEFAULT_SEARCH_DELAY_MS,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            interactions_file: None,
        }
    }
}

impl CheckerConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `RxError::ConfigError` if the TOML is malformed, names an
    /// unknown key, or fails [`CheckerConfig::validate`].
    pub fn from_toml_str(s: &str) -> RxResult<Self> {
        let config: CheckerConfig = toml::from_str(s).map_err(|e| RxError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML.
    ///
    /// A relative `interactions_file` is resolved against the config file's
    /// directory.
    pub fn from_file(path: &Path) -> RxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RxError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let mut config = Self::from_toml_str(&contents)?;

        if let (Some(file), Some(dir)) = (&config.interactions_file, path.parent()) {
            if file.is_relative() {
                config.interactions_file = Some(dir.join(file));
            }
        }
        Ok(config)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    /// Check value ranges: `min_query_len` at least 1, `search_delay_ms` at
    /// most [`MAX_SEARCH_DELAY_MS`].
    pub fn validate(&self) -> RxResult<()> {
        if self.search_delay_ms > MAX_SEARCH_DELAY_MS {
            return Err(RxError::ConfigError {
                reason: format!(
                    "search_delay_ms must be at most {} (got {})",
                    MAX_SEARCH_DELAY_MS, self.search_delay_ms
                ),
            });
        }
        if self.min_query_len == 0 {
            return Err(RxError::ConfigError {
                reason: "min_query_len must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
