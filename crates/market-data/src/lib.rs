//! Stockfeed Market Data Crate
//!
//! This crate fetches per-stock economic records and historical OHLCV quotes
//! for an arbitrary set of tickers from a remote data provider.
//!
//! # Overview
//!
//! Providers only answer for a limited number of tickers per request and
//! fail now and then. The crate supports:
//! - Splitting ticker sets into fixed-size, deterministic batches
//! - Immediate, count-bounded retry of failed batches
//! - Merging per-batch results, tolerating batches that never succeed
//! - Single-call historical quote fetching
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     Caller       |  get_economics / get_historical_quotes
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | MarketDataService|  (DataConnector)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |   plan_batches   | --> | RetryController  |  (one batch at a time)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  ProviderClient  |  (remote provider)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | RecordConverter  |  (provider -> domain)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      merge       |  (EconomicsResult)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataService`] - Default [`DataConnector`] implementation
//! - [`ProviderClient`] - Remote provider seam
//! - [`RecordConverter`] - Provider record to domain record mapping
//! - [`Stock`] / [`EconomicRecord`] - Domain economics
//! - [`Quote`] - Historical price observation
//! - [`FetchConfig`] - Batch size, retries and concurrency
//! - [`FetchReport`] - Per-batch outcomes of one economics fetch

pub mod errors;
pub mod fetch;
pub mod models;
pub mod provider;
pub mod service;

// Re-export all public types from models
pub use models::{
    Currency, EconomicRecord, EconomicsByDate, EconomicsResult, HistoryPoint, Interval,
    ProviderQuote, ProviderStats, ProviderStock, ProviderStocks, Quote, QuoteResult, QuoteSet,
    Stock, Ticker,
};

// Re-export fetch types
pub use fetch::{
    merge, merge_into, plan_batches, Batch, BatchFetcher, BatchOutcome, BatchStatus, FetchConfig,
    FetchReport, RetryController, DEFAULT_BATCH_SIZE, DEFAULT_MAX_RETRIES,
};

// Re-export provider and service types
pub use errors::MarketDataError;
pub use provider::{ProviderClient, RecordConverter, SnapshotConverter};
pub use service::{DataConnector, MarketDataService};
