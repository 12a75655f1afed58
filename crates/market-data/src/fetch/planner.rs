//! Splits a ticker set into provider-sized batches.

use std::collections::BTreeSet;
use std::fmt;

/// Default number of tickers per provider request.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Ordered group of tickers sent to the provider in one request.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Batch {
    tickers: Vec<String>,
}

impl Batch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            tickers: Vec::with_capacity(capacity),
        }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Tickers joined with ", " for log lines
    pub fn joined(&self) -> String {
        self.tickers.join(", ")
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.joined())
    }
}

/// Plan provider batches for a set of tickers.
///
/// Symbols are trimmed and blank ones dropped without taking a slot. The
/// remaining symbols are deduplicated and sorted so the same input always
/// yields the same batches. Every batch holds `capacity` tickers except the
/// last, which holds the remainder. Empty input yields a single empty batch.
///
/// A `capacity` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use stockfeed_market_data::fetch::plan_batches;
///
/// let batches = plan_batches(["MSFT", "", "AAPL", "GOOG"], 2);
/// assert_eq!(batches.len(), 2);
/// assert_eq!(batches[0].tickers(), ["AAPL", "GOOG"]);
/// assert_eq!(batches[1].tickers(), ["MSFT"]);
/// ```
pub fn plan_batches<I, S>(tickers: I, capacity: usize) -> Vec<Batch>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let capacity = capacity.max(1);
    let ordered: BTreeSet<String> = tickers
        .into_iter()
        .filter_map(|t| {
            let t = t.as_ref().trim();
            (!t.is_empty()).then(|| t.to_string())
        })
        .collect();

    let mut batches = Vec::with_capacity(ordered.len() / capacity + 1);
    let mut current = Batch::with_capacity(capacity);

    for ticker in ordered {
        if current.len() >= capacity {
            batches.push(std::mem::replace(
                &mut current,
                Batch::with_capacity(capacity),
            ));
        }
        current.tickers.push(ticker);
    }

    batches.push(current);
    batches
}
