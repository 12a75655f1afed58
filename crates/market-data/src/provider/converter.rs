//! Provider record to domain record conversion.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::models::{
    EconomicRecord, EconomicsByDate, EconomicsResult, ProviderStock, ProviderStocks, Stock,
};

/// Maps provider-native stock records into the domain's economic shape.
///
/// Conversion is infallible: a record the converter cannot use is left out
/// of the result or mapped to an empty date map.
pub trait RecordConverter: Send + Sync {
    fn to_economics(&self, stocks: ProviderStocks) -> EconomicsResult;
}

/// Converts each provider stock into a single dated snapshot record.
///
/// The record is keyed by the provider quote's `as_of` date. Quotes without
/// a date are filed under "today", which is the current UTC date unless a
/// fixed date was configured with [`SnapshotConverter::with_today`].
#[derive(Clone, Debug, Default)]
pub struct SnapshotConverter {
    today: Option<NaiveDate>,
}

impl SnapshotConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed date for undated snapshots
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    fn to_stock(ticker: &str, stock: &ProviderStock) -> Stock {
        Stock {
            ticker: Arc::from(ticker),
            name: stock.name.clone(),
            exchange: stock.stock_exchange.clone(),
            currency: stock.currency.clone().map(Into::into),
        }
    }

    fn to_record(stock: &ProviderStock) -> EconomicRecord {
        let mut record = EconomicRecord::default();

        if let Some(quote) = &stock.quote {
            record.price = quote.price;
            record.change = quote.change;
            record.volume = quote.volume;
            record.year_high = quote.year_high;
            record.year_low = quote.year_low;
        }

        if let Some(stats) = &stock.stats {
            record.market_cap = stats.market_cap;
            record.pe_ratio = stats.pe;
            record.eps = stats.eps;
            record.book_value_per_share = stats.book_value_per_share;
            record.dividend_yield = stats.dividend_yield;
        }

        record
    }
}

impl RecordConverter for SnapshotConverter {
    fn to_economics(&self, stocks: ProviderStocks) -> EconomicsResult {
        let today = self.today();

        stocks
            .iter()
            .map(|(ticker, stock)| {
                let record = Self::to_record(stock);
                let mut by_date = EconomicsByDate::new();
                if !record.is_empty() {
                    let date = stock.quote.as_ref().and_then(|q| q.as_of).unwrap_or(today);
                    by_date.insert(date, record);
                }
                (Self::to_stock(ticker, stock), by_date)
            })
            .collect()
    }
}
