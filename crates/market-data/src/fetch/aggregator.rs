//! Merging of per-batch economics into one result.

use crate::models::EconomicsResult;

/// Fold one batch's result into an accumulator and return it.
///
/// Entries in `partial` replace entries for the same stock in `acc`.
pub fn merge(mut acc: EconomicsResult, partial: EconomicsResult) -> EconomicsResult {
    merge_into(&mut acc, partial);
    acc
}

/// Insert every entry of `partial` into `target`, last writer wins.
///
/// Batches never share a ticker, so collisions only happen when a provider
/// answers with a stock that was requested in another batch.
pub fn merge_into(target: &mut EconomicsResult, partial: EconomicsResult) {
    for (stock, by_date) in partial {
        // Replace the key too so the newest descriptive fields survive
        target.remove(&stock);
        target.insert(stock, by_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EconomicRecord, EconomicsByDate, Stock};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn partial(tickers: &[&str]) -> EconomicsResult {
        tickers
            .iter()
            .map(|t| (Stock::new(*t), EconomicsByDate::new()))
            .collect()
    }

    #[test]
    fn test_disjoint_merge_sums_entries() {
        let merged = merge(partial(&["AAPL", "MSFT"]), partial(&["GOOG", "AMZN", "TSLA"]));
        assert_eq!(merged.len(), 5);
    }

    #[test]
    fn test_merge_into_empty() {
        let mut target = EconomicsResult::new();
        merge_into(&mut target, partial(&["AAPL"]));
        merge_into(&mut target, EconomicsResult::new());
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_collision_last_writer_wins() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut newer = EconomicsByDate::new();
        newer.insert(
            date,
            EconomicRecord {
                price: Some(dec!(190)),
                ..Default::default()
            },
        );
        let mut stock = Stock::new("AAPL");
        stock.name = Some("Apple Inc.".to_string());

        let mut update = EconomicsResult::new();
        update.insert(stock, newer);

        let merged = merge(partial(&["AAPL"]), update);
        let (key, by_date) = merged.iter().next().unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(key.name.as_deref(), Some("Apple Inc."));
        assert_eq!(by_date[&date].price, Some(dec!(190)));
    }
}
