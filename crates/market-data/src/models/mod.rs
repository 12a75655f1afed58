//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `types` - Type aliases for common identifiers (Currency, Ticker)
//! - `stock` - Domain stock identity and per-date economic records
//! - `quote` - Historical price observations (Quote, QuoteSet)
//! - `provider_stock` - Provider-native records handed over by a `ProviderClient`

mod provider_stock;
mod quote;
mod stock;
mod types;

pub use provider_stock::{
    HistoryPoint, Interval, ProviderQuote, ProviderStats, ProviderStock, ProviderStocks,
};
pub use quote::{Quote, QuoteResult, QuoteSet};
pub use stock::{EconomicRecord, EconomicsByDate, EconomicsResult, Stock};
pub use types::{Currency, Ticker};
