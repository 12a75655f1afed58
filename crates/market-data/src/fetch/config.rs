//! Fetch configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::planner::DEFAULT_BATCH_SIZE;
use crate::errors::MarketDataError;
use crate::models::Interval;

/// Default number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default number of batches in flight at once.
const DEFAULT_CONCURRENCY: usize = 1;

pub const ENV_BATCH_SIZE: &str = "STOCKFEED_BATCH_SIZE";
pub const ENV_MAX_RETRIES: &str = "STOCKFEED_MAX_RETRIES";
pub const ENV_CONCURRENCY: &str = "STOCKFEED_CONCURRENCY";
pub const ENV_HISTORY_INTERVAL: &str = "STOCKFEED_HISTORY_INTERVAL";

/// Batching and retry configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum tickers per provider request.
    pub batch_size: usize,
    /// Retries after the first failed attempt of a batch. Zero disables retrying.
    pub max_retries: u32,
    /// Batches processed at the same time. One processes batches in order.
    pub concurrency: usize,
    /// Sampling interval for historical quotes.
    pub history_interval: Interval,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            concurrency: DEFAULT_CONCURRENCY,
            history_interval: Interval::Daily,
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_history_interval(mut self, interval: Interval) -> Self {
        self.history_interval = interval;
        self
    }

    /// Total provider calls allowed for one batch.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Build a configuration from `STOCKFEED_*` environment variables.
    ///
    /// Unset variables keep their default. A variable that is set but cannot
    /// be parsed is an error rather than being silently ignored.
    pub fn from_env() -> Result<Self, MarketDataError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse a configuration from a JSON value, e.g. a section of app settings.
    ///
    /// Expected format (every field optional):
    /// ```json
    /// { "batch_size": 20, "max_retries": 5, "concurrency": 1, "history_interval": "1d" }
    /// ```
    pub fn from_json(json: &serde_json::Value) -> Result<Self, MarketDataError> {
        let config: Self =
            serde_json::from_value(json.clone()).map_err(|e| MarketDataError::InvalidConfig {
                key: "fetch".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, MarketDataError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            batch_size: parse_var(&lookup, ENV_BATCH_SIZE)?.unwrap_or(defaults.batch_size),
            max_retries: parse_var(&lookup, ENV_MAX_RETRIES)?.unwrap_or(defaults.max_retries),
            concurrency: parse_var(&lookup, ENV_CONCURRENCY)?.unwrap_or(defaults.concurrency),
            history_interval: parse_var(&lookup, ENV_HISTORY_INTERVAL)?
                .unwrap_or(defaults.history_interval),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the fetch layer cannot work with.
    pub fn validate(&self) -> Result<(), MarketDataError> {
        if self.batch_size == 0 {
            return Err(MarketDataError::InvalidConfig {
                key: "batch_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.concurrency == 0 {
            return Err(MarketDataError::InvalidConfig {
                key: "concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, MarketDataError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| MarketDataError::InvalidConfig {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_attempts(), 6);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.history_interval, Interval::Daily);
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let config = FetchConfig::from_lookup(lookup(&[
            (ENV_BATCH_SIZE, "50"),
            (ENV_MAX_RETRIES, " 2 "),
            (ENV_HISTORY_INTERVAL, "1wk"),
        ]))
        .unwrap();

        assert_eq!(config.batch_size, 50);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.history_interval, Interval::Weekly);
    }

    #[test]
    fn test_unparsable_variable_is_error() {
        let err = FetchConfig::from_lookup(lookup(&[(ENV_MAX_RETRIES, "five")])).unwrap_err();
        assert!(matches!(
            err,
            MarketDataError::InvalidConfig { ref key, .. } if key == ENV_MAX_RETRIES
        ));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = FetchConfig::from_lookup(lookup(&[(ENV_BATCH_SIZE, "0")])).unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidConfig { .. }));
        assert!(FetchConfig::new().with_concurrency(0).validate().is_err());
    }

    #[test]
    fn test_zero_retries_means_single_attempt() {
        let config = FetchConfig::new().with_max_retries(0);
        assert!(config.validate().is_ok());
        assert_eq!(config.max_attempts(), 1);
    }

    #[test]
    fn test_from_json_partial() {
        let json = serde_json::json!({ "max_retries": 3, "history_interval": "1mo" });
        let config = FetchConfig::from_json(&json).unwrap();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.history_interval, Interval::Monthly);
    }

    #[test]
    fn test_from_json_invalid() {
        let json = serde_json::json!({ "batch_size": "many" });
        assert!(FetchConfig::from_json(&json).is_err());
    }
}
