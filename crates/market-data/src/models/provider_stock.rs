//! Provider-native records.
//!
//! These mirror what a quote provider hands back for one ticker. They are
//! produced by a `ProviderClient` and consumed by a `RecordConverter` or the
//! historical quote path; the rest of the crate never looks inside them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Provider response keyed by the ticker symbol the provider answered for.
pub type ProviderStocks = HashMap<String, ProviderStock>;

/// Sampling interval for price history requests.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
}

impl Interval {
    /// Wire code used in provider requests
    pub fn code(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" | "daily" => Ok(Self::Daily),
            "1wk" | "weekly" => Ok(Self::Weekly),
            "1mo" | "monthly" => Ok(Self::Monthly),
            other => Err(MarketDataError::InvalidConfig {
                key: "interval".to_string(),
                message: format!("unknown interval '{}'", other),
            }),
        }
    }
}

/// Everything a provider reports for one ticker.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStock {
    pub symbol: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub stock_exchange: Option<String>,

    #[serde(default)]
    pub quote: Option<ProviderQuote>,

    #[serde(default)]
    pub stats: Option<ProviderStats>,

    /// Price history, only filled by history requests
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
}

impl ProviderStock {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}

/// Current trading snapshot
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderQuote {
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub change: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default)]
    pub year_high: Option<Decimal>,
    #[serde(default)]
    pub year_low: Option<Decimal>,
    /// Trading day the snapshot belongs to
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Fundamental statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub pe: Option<Decimal>,
    #[serde(default)]
    pub eps: Option<Decimal>,
    #[serde(default)]
    pub book_value_per_share: Option<Decimal>,
    /// Annual dividend yield in percent
    #[serde(default)]
    pub dividend_yield: Option<Decimal>,
}

/// One point of provider price history
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}
