//! Provider client trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{Interval, ProviderStocks};

/// Trait for remote market data providers.
///
/// Implement this trait to plug in a new data source. The fetch layer
/// decides how many tickers go into one call and how often a failed call is
/// repeated; an implementation only has to perform a single request.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use stockfeed_market_data::provider::ProviderClient;
///
/// struct MyProvider {
///     client: reqwest::Client,
/// }
///
/// #[async_trait]
/// impl ProviderClient for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn fetch_economics(&self, tickers: &[String]) -> Result<ProviderStocks, MarketDataError> {
///         let response = self.client.get(url_for(tickers)).send().await?;
///         Ok(response.json().await?)
///     }
///
///     // ... implement fetch_history
/// }
/// ```
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the current economic snapshot for a batch of tickers.
    ///
    /// # Returns
    ///
    /// Provider records keyed by ticker. Tickers the provider does not know
    /// are simply absent. Any failure of the call is reported as an error.
    async fn fetch_economics(&self, tickers: &[String]) -> Result<ProviderStocks, MarketDataError>;

    /// Fetch price history for a set of tickers.
    ///
    /// # Arguments
    ///
    /// * `tickers` - The tickers to fetch, in no particular order
    /// * `since` - First day of the requested range; the range ends now
    /// * `interval` - Sampling interval of the returned history
    ///
    /// # Returns
    ///
    /// Provider records keyed by ticker with `history` filled in.
    async fn fetch_history(
        &self,
        tickers: &[String],
        since: NaiveDate,
        interval: Interval,
    ) -> Result<ProviderStocks, MarketDataError>;
}
