//! Per-batch outcome tracking for fetch diagnostics.

use super::planner::Batch;

/// How a batch ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BatchStatus {
    /// The provider answered; `stocks` entries were converted.
    Succeeded { stocks: usize },

    /// Every attempt failed; the batch contributed nothing.
    Failed { error: String },
}

/// Record of one batch's trip through the retry loop.
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    pub tickers: Vec<String>,
    /// Provider calls made for this batch, including the first.
    pub attempts: u32,
    pub status: BatchStatus,
}

impl BatchOutcome {
    pub fn succeeded(batch: &Batch, attempts: u32, stocks: usize) -> Self {
        Self {
            tickers: batch.tickers().to_vec(),
            attempts,
            status: BatchStatus::Succeeded { stocks },
        }
    }

    pub fn failed(batch: &Batch, attempts: u32, error: String) -> Self {
        Self {
            tickers: batch.tickers().to_vec(),
            attempts,
            status: BatchStatus::Failed { error },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, BatchStatus::Succeeded { .. })
    }
}

/// Outcomes of every batch processed by one economics fetch.
#[derive(Clone, Debug, Default)]
pub struct FetchReport {
    pub batches: Vec<BatchOutcome>,
}

impl FetchReport {
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: BatchOutcome) {
        self.batches.push(outcome);
    }

    pub fn succeeded(&self) -> usize {
        self.batches.iter().filter(|b| b.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.batches.len() - self.succeeded()
    }

    /// Tickers whose batch gave up, in batch order.
    pub fn failed_tickers(&self) -> Vec<&str> {
        self.batches
            .iter()
            .filter(|b| !b.is_success())
            .flat_map(|b| b.tickers.iter().map(String::as_str))
            .collect()
    }

    pub fn total_attempts(&self) -> u32 {
        self.batches.iter().map(|b| b.attempts).sum()
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.batches
            .iter()
            .map(|b| match &b.status {
                BatchStatus::Succeeded { stocks } => format!(
                    "[{}]: SUCCESS ({} stocks, {} attempts)",
                    b.tickers.join(", "),
                    stocks,
                    b.attempts
                ),
                BatchStatus::Failed { error } => format!(
                    "[{}]: FAILED after {} attempts ({})",
                    b.tickers.join(", "),
                    b.attempts,
                    error
                ),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::plan_batches;

    #[test]
    fn test_report_counts() {
        let batches = plan_batches(["AAPL", "MSFT", "GOOG"], 2);
        let mut report = FetchReport::new();
        report.record(BatchOutcome::succeeded(&batches[0], 2, 2));
        report.record(BatchOutcome::failed(&batches[1], 6, "timeout".to_string()));

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.total_attempts(), 8);
        assert_eq!(report.failed_tickers(), vec!["MSFT"]);
    }

    #[test]
    fn test_summary() {
        let batches = plan_batches(["AAPL", "GOOG", "MSFT"], 2);
        let mut report = FetchReport::new();
        report.record(BatchOutcome::succeeded(&batches[0], 1, 2));
        report.record(BatchOutcome::failed(&batches[1], 6, "timeout".to_string()));

        assert_eq!(
            report.summary(),
            "[AAPL, GOOG]: SUCCESS (2 stocks, 1 attempts); [MSFT]: FAILED after 6 attempts (timeout)"
        );
    }
}
