use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Currency, Ticker};

/// Economic records for one stock, keyed by calendar date.
pub type EconomicsByDate = BTreeMap<NaiveDate, EconomicRecord>;

/// Economic data for a set of stocks, keyed by stock identity.
pub type EconomicsResult = HashMap<Stock, EconomicsByDate>;

/// Domain stock identity.
///
/// Two stocks are the same stock when their tickers match; the descriptive
/// fields ride along but do not take part in equality or hashing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stock {
    pub ticker: Ticker,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Listing exchange as reported by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl Stock {
    /// Create a stock with only its ticker set
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            name: None,
            exchange: None,
            currency: None,
        }
    }
}

impl PartialEq for Stock {
    fn eq(&self, other: &Self) -> bool {
        self.ticker == other.ticker
    }
}

impl Eq for Stock {}

impl Hash for Stock {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ticker.hash(state);
    }
}

/// Per-stock, per-date fundamental data point.
///
/// Every field is optional; providers fill in what they have.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    /// Absolute change since the previous close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_value_per_share: Option<Decimal>,

    /// Annual dividend yield in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_low: Option<Decimal>,
}

impl EconomicRecord {
    /// Returns true when no field carries data
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
