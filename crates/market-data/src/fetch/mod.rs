//! Batching, retry and aggregation for economics fetching.
//!
//! This module provides:
//! - [`plan_batches`]: split a ticker set into provider-sized [`Batch`]es
//! - [`BatchFetcher`] / [`RetryController`]: fetch one batch with bounded retries
//! - [`merge`] / [`merge_into`]: combine per-batch results
//! - [`FetchReport`]: per-batch outcomes for callers that need more than logs
//! - [`FetchConfig`]: batch size, retry count and concurrency settings

mod aggregator;
mod config;
mod outcome;
mod planner;
mod retry;

pub use aggregator::{merge, merge_into};
pub use config::{
    FetchConfig, DEFAULT_MAX_RETRIES, ENV_BATCH_SIZE, ENV_CONCURRENCY, ENV_HISTORY_INTERVAL,
    ENV_MAX_RETRIES,
};
pub use outcome::{BatchOutcome, BatchStatus, FetchReport};
pub use planner::{plan_batches, Batch, DEFAULT_BATCH_SIZE};
pub use retry::{BatchFetcher, RetryController};
