//! Error types for the market data crate.
//!
//! Providers report a single failure kind in practice: the call did not
//! complete. The fetch layer treats every variant the same way (retry, then
//! give up); [`MarketDataError`] exists to keep the cause around for logging.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider call failed at the I/O level.
    /// Ticker-not-found, rate limiting and network outages all surface here.
    #[error("Transport error: {provider} - {message}")]
    Transport {
        /// The provider that failed
        provider: String,
        /// The error message reported by the client
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred while reading a provider response.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value could not be parsed or is out of range.
    #[error("Invalid config {key}: {message}")]
    InvalidConfig {
        /// The configuration key
        key: String,
        /// Why the value was rejected
        message: String,
    },
}

impl MarketDataError {
    /// Shorthand for a [`MarketDataError::Transport`] error.
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
