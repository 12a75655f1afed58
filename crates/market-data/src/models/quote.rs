use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::Ticker;

/// Distinct historical observations for one ticker.
pub type QuoteSet = HashSet<Quote>;

/// Historical quotes keyed by ticker symbol.
pub type QuoteResult = HashMap<String, QuoteSet>;

/// Historical price observation
///
/// Prices are plain floats. Equality and hashing compare their bit patterns,
/// so identical observations collapse inside a [`QuoteSet`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub ticker: Ticker,

    pub open: f64,

    pub close: f64,

    pub high: f64,

    pub low: f64,

    pub volume: i64,

    /// Date-time of the observation
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Epoch milliseconds of the observation
    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    fn key(&self) -> (&str, [u64; 4], i64, DateTime<Utc>) {
        (
            &*self.ticker,
            [
                self.open.to_bits(),
                self.close.to_bits(),
                self.high.to_bits(),
                self.low.to_bits(),
            ],
            self.volume,
            self.timestamp,
        )
    }
}

impl PartialEq for Quote {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Quote {}

impl Hash for Quote {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn quote(close: f64, day: u32) -> Quote {
        Quote {
            ticker: Arc::from("AAPL"),
            open: 148.0,
            close,
            high: 152.0,
            low: 147.5,
            volume: 1_000_000,
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_identical_quotes_collapse_in_set() {
        let mut set = QuoteSet::new();
        set.insert(quote(150.25, 1));
        set.insert(quote(150.25, 1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_distinct_quotes_kept() {
        let mut set = QuoteSet::new();
        set.insert(quote(150.25, 1));
        set.insert(quote(150.25, 2));
        set.insert(quote(151.00, 1));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_epoch_millis() {
        let q = quote(150.25, 1);
        assert_eq!(q.epoch_millis(), 1_709_251_200_000);
    }
}
