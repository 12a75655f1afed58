//! Per-batch fetching with bounded, immediate retry.

use std::sync::Arc;

use log::{debug, error, warn};

use super::outcome::BatchOutcome;
use super::planner::Batch;
use crate::errors::MarketDataError;
use crate::models::EconomicsResult;
use crate::provider::{ProviderClient, RecordConverter};

/// Fetches economics for a single batch: one provider call, then conversion.
#[derive(Clone)]
pub struct BatchFetcher {
    provider: Arc<dyn ProviderClient>,
    converter: Arc<dyn RecordConverter>,
}

impl BatchFetcher {
    pub fn new(provider: Arc<dyn ProviderClient>, converter: Arc<dyn RecordConverter>) -> Self {
        Self {
            provider,
            converter,
        }
    }

    /// Make one provider call for `batch`.
    ///
    /// Returns the converted economics, or the provider error untouched so
    /// the caller can decide whether to try again.
    pub async fn fetch(&self, batch: &Batch) -> Result<EconomicsResult, MarketDataError> {
        match self.provider.fetch_economics(batch.tickers()).await {
            Ok(stocks) => {
                debug!(
                    "Provider '{}' returned {} stocks for batch {}",
                    self.provider.id(),
                    stocks.len(),
                    batch
                );
                Ok(self.converter.to_economics(stocks))
            }
            Err(e) => {
                warn!(
                    "Error getting economics from '{}' for {}: {}",
                    self.provider.id(),
                    batch.joined(),
                    e
                );
                Err(e)
            }
        }
    }
}

/// Drives a [`BatchFetcher`] until the batch succeeds or retries run out.
///
/// Retries are immediate and bounded by count only. A batch that exhausts
/// its retries yields an empty result; the failure is logged and reported
/// in the returned [`BatchOutcome`], never propagated.
#[derive(Clone)]
pub struct RetryController {
    fetcher: BatchFetcher,
    max_retries: u32,
}

impl RetryController {
    pub fn new(fetcher: BatchFetcher, max_retries: u32) -> Self {
        Self {
            fetcher,
            max_retries,
        }
    }

    /// Fetch `batch`, retrying up to `max_retries` times after the first failure.
    pub async fn run(&self, batch: &Batch) -> (EconomicsResult, BatchOutcome) {
        let max_attempts = self.max_retries.saturating_add(1);
        let mut attempts: u32 = 1;
        let mut result = self.fetcher.fetch(batch).await;

        loop {
            match result {
                Ok(economics) => {
                    let outcome = BatchOutcome::succeeded(batch, attempts, economics.len());
                    return (economics, outcome);
                }
                Err(e) if attempts < max_attempts => {
                    attempts += 1;
                    warn!(
                        "Retrying batch {} (attempt {} of {}) after error: {}",
                        batch.joined(),
                        attempts,
                        max_attempts,
                        e
                    );
                    result = self.fetcher.fetch(batch).await;
                }
                Err(e) => {
                    error!(
                        "Giving up on batch {} after {} failed attempts: {}",
                        batch.joined(),
                        attempts,
                        e
                    );
                    let outcome = BatchOutcome::failed(batch, attempts, e.to_string());
                    return (EconomicsResult::new(), outcome);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::plan_batches;
    use crate::fetch::BatchStatus;
    use crate::models::{Interval, ProviderStock, ProviderStocks, Stock};
    use crate::provider::SnapshotConverter;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails the first `failures` calls, then answers with every requested ticker.
    struct FlakyProvider {
        failures: usize,
        call_count: AtomicUsize,
    }

    impl FlakyProvider {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                call_count: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProviderClient for FlakyProvider {
        fn id(&self) -> &'static str {
            "FLAKY"
        }

        async fn fetch_economics(
            &self,
            tickers: &[String],
        ) -> Result<ProviderStocks, MarketDataError> {
            let call = self.call_count.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(MarketDataError::transport(self.id(), "connection reset"));
            }
            Ok(tickers
                .iter()
                .map(|t| (t.clone(), ProviderStock::new(t.clone())))
                .collect())
        }

        async fn fetch_history(
            &self,
            _tickers: &[String],
            _since: NaiveDate,
            _interval: Interval,
        ) -> Result<ProviderStocks, MarketDataError> {
            unimplemented!()
        }
    }

    fn controller(provider: Arc<FlakyProvider>, max_retries: u32) -> RetryController {
        let fetcher = BatchFetcher::new(provider, Arc::new(SnapshotConverter::new()));
        RetryController::new(fetcher, max_retries)
    }

    fn batch() -> Batch {
        plan_batches(["AAPL", "MSFT"], 20).remove(0)
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let provider = Arc::new(FlakyProvider::new(0));
        let (economics, outcome) = controller(provider.clone(), 5).run(&batch()).await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(economics.len(), 2);
        assert!(economics.contains_key(&Stock::new("MSFT")));
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.status, BatchStatus::Succeeded { stocks: 2 });
    }

    #[tokio::test]
    async fn test_success_on_attempt_k_makes_k_calls() {
        for k in 1..=6 {
            let provider = Arc::new(FlakyProvider::new(k - 1));
            let (economics, outcome) = controller(provider.clone(), 5).run(&batch()).await;

            assert_eq!(provider.calls(), k, "attempt {}", k);
            assert_eq!(economics.len(), 2);
            assert_eq!(outcome.attempts as usize, k);
            assert!(outcome.is_success());
        }
    }

    #[tokio::test]
    async fn test_gives_up_after_six_calls() {
        let provider = Arc::new(FlakyProvider::new(usize::MAX));
        let (economics, outcome) = controller(provider.clone(), 5).run(&batch()).await;

        assert_eq!(provider.calls(), 6);
        assert!(economics.is_empty());
        assert_eq!(outcome.attempts, 6);
        assert_eq!(outcome.tickers, vec!["AAPL", "MSFT"]);
        assert!(matches!(
            outcome.status,
            BatchStatus::Failed { ref error } if error.contains("connection reset")
        ));
    }

    #[tokio::test]
    async fn test_zero_retries_single_call() {
        let provider = Arc::new(FlakyProvider::new(1));
        let (economics, outcome) = controller(provider.clone(), 0).run(&batch()).await;

        assert_eq!(provider.calls(), 1);
        assert!(economics.is_empty());
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_unbounded_retry_count() {
        let provider = Arc::new(FlakyProvider::new(3));
        let (economics, outcome) = controller(provider.clone(), u32::MAX).run(&batch()).await;

        assert_eq!(provider.calls(), 4);
        assert_eq!(economics.len(), 2);
        assert_eq!(outcome.attempts, 4);
    }

    #[tokio::test]
    async fn test_fetcher_returns_error() {
        let provider = Arc::new(FlakyProvider::new(1));
        let fetcher = BatchFetcher::new(provider.clone(), Arc::new(SnapshotConverter::new()));

        assert!(fetcher.fetch(&batch()).await.is_err());
        assert_eq!(fetcher.fetch(&batch()).await.unwrap().len(), 2);
    }
}
