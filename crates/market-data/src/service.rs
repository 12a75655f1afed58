//! Market data service - the public entry point of the crate.
//!
//! ```text
//!   tickers ──▶ plan_batches ──▶ RetryController (per batch) ──▶ merge ──▶ EconomicsResult
//!                                      │
//!                              ProviderClient + RecordConverter
//!
//!   tickers ──▶ ProviderClient::fetch_history (single call) ──▶ QuoteResult
//! ```
//!
//! The two paths fail differently. Economics are fetched per batch and a
//! batch that keeps failing only loses its own tickers. Historical quotes are
//! fetched in one call and any failure loses the whole result.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use num_traits::ToPrimitive;

use crate::errors::MarketDataError;
use crate::fetch::{
    merge_into, plan_batches, BatchFetcher, FetchConfig, FetchReport, RetryController,
};
use crate::models::{
    EconomicsResult, HistoryPoint, ProviderStocks, Quote, QuoteResult, QuoteSet, Ticker,
};
use crate::provider::{ProviderClient, RecordConverter};

/// Market data operations consumed by downstream code.
///
/// Neither operation fails: missing tickers in the result are the only sign
/// that something went wrong, with the details in the logs.
#[async_trait]
pub trait DataConnector: Send + Sync {
    /// Economic records for every ticker whose batch could be fetched.
    async fn get_economics(&self, tickers: &HashSet<String>) -> EconomicsResult;

    /// Price history from `from_date` until now, one entry per ticker the
    /// provider answered for. Empty when the provider call fails.
    async fn get_historical_quotes(
        &self,
        tickers: &HashSet<String>,
        from_date: NaiveDate,
    ) -> QuoteResult;
}

/// Default [`DataConnector`] backed by a [`ProviderClient`].
pub struct MarketDataService {
    provider: Arc<dyn ProviderClient>,
    retry: RetryController,
    config: FetchConfig,
}

impl MarketDataService {
    /// Create a service with the default configuration.
    pub fn new(provider: Arc<dyn ProviderClient>, converter: Arc<dyn RecordConverter>) -> Self {
        let config = FetchConfig::default();
        let fetcher = BatchFetcher::new(provider.clone(), converter);
        Self {
            provider,
            retry: RetryController::new(fetcher, config.max_retries),
            config,
        }
    }

    /// Create a service with a custom configuration.
    pub fn with_config(
        provider: Arc<dyn ProviderClient>,
        converter: Arc<dyn RecordConverter>,
        config: FetchConfig,
    ) -> Result<Self, MarketDataError> {
        config.validate()?;
        let fetcher = BatchFetcher::new(provider.clone(), converter);
        Ok(Self {
            provider,
            retry: RetryController::new(fetcher, config.max_retries),
            config,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch economics and report how each batch fared.
    ///
    /// Batches run `config.concurrency` at a time (one by default). Their
    /// results are merged as they complete and the report lists outcomes in
    /// batch order. Input without any usable ticker returns immediately
    /// without calling the provider.
    pub async fn get_economics_with_report<I, S>(
        &self,
        tickers: I,
    ) -> (EconomicsResult, FetchReport)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut economics = EconomicsResult::new();
        let mut report = FetchReport::new();

        let batches: Vec<_> = plan_batches(tickers, self.config.batch_size)
            .into_iter()
            .filter(|b| !b.is_empty())
            .collect();

        if batches.is_empty() {
            debug!("No tickers requested, skipping economics fetch");
            return (economics, report);
        }

        info!(
            "Fetching economics from '{}' for {} tickers in {} batches",
            self.provider.id(),
            batches.iter().map(|b| b.len()).sum::<usize>(),
            batches.len()
        );

        let runs: Vec<_> = batches.iter().map(|batch| self.retry.run(batch)).collect();
        let mut results = stream::iter(runs).buffered(self.config.concurrency);

        while let Some((partial, outcome)) = results.next().await {
            merge_into(&mut economics, partial);
            report.record(outcome);
        }

        if report.failed() > 0 {
            warn!(
                "Economics fetch finished with {} of {} batches failed, missing tickers: {}",
                report.failed(),
                report.batches.len(),
                report.failed_tickers().join(", ")
            );
        } else {
            info!(
                "Economics fetch finished: {} stocks from {} batches",
                economics.len(),
                report.batches.len()
            );
        }
        debug!("Economics fetch report: {}", report.summary());

        (economics, report)
    }

    fn to_quote(ticker: &Ticker, point: &HistoryPoint) -> Quote {
        Quote {
            ticker: ticker.clone(),
            open: point.open.to_f64().unwrap_or(0.0),
            close: point.close.to_f64().unwrap_or(0.0),
            high: point.high.to_f64().unwrap_or(0.0),
            low: point.low.to_f64().unwrap_or(0.0),
            volume: point.volume,
            timestamp: point.date,
        }
    }

    fn to_quotes(stocks: ProviderStocks) -> QuoteResult {
        stocks
            .into_iter()
            .map(|(ticker, stock)| {
                let symbol: Ticker = Arc::from(ticker.as_str());
                let set: QuoteSet = stock
                    .history
                    .iter()
                    .map(|point| Self::to_quote(&symbol, point))
                    .collect();
                (ticker, set)
            })
            .collect()
    }
}

#[async_trait]
impl DataConnector for MarketDataService {
    async fn get_economics(&self, tickers: &HashSet<String>) -> EconomicsResult {
        self.get_economics_with_report(tickers).await.0
    }

    async fn get_historical_quotes(
        &self,
        tickers: &HashSet<String>,
        from_date: NaiveDate,
    ) -> QuoteResult {
        let mut requested: Vec<String> = tickers
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        requested.sort();
        requested.dedup();

        if requested.is_empty() {
            debug!("No tickers requested, skipping history fetch");
            return QuoteResult::new();
        }

        let interval = self.config.history_interval;
        info!(
            "Fetching {} history from '{}' for {} tickers since {}",
            interval,
            self.provider.id(),
            requested.len(),
            from_date
        );

        let converted = self
            .provider
            .fetch_history(&requested, from_date, interval)
            .await
            .map(Self::to_quotes);

        match converted {
            Ok(quotes) => {
                debug!("Loaded history for {} tickers", quotes.len());
                quotes
            }
            Err(e) => {
                error!(
                    "Error occurred while getting historical quotes for {}: {}",
                    requested.join(", "),
                    e
                );
                QuoteResult::new()
            }
        }
    }
}
