// In crates/api-client/src/market_data.rs

use crate::{Error, Result};
use async_trait::async_trait;
use core_types::{PriceTable, Symbol};

/// A source of price history for the band engine.
///
/// Implementations hand back a table with normalised column names and fail
/// instead of substituting data when the result is empty or incomplete.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// The name of the provider (e.g., "YahooFinance", "CsvFiles").
    fn name(&self) -> &'static str;

    /// Fetches bars of size `interval` covering the last `lookback` (e.g., "1h", "60d").
    async fn fetch(&self, symbol: &Symbol, interval: &str, lookback: &str) -> Result<PriceTable>;
}

/// Rejects empty tables and tables lacking High, Low or Close.
pub fn validate_table(symbol: &Symbol, table: PriceTable) -> Result<PriceTable> {
    if table.is_empty() {
        return Err(Error::NoDataRetrieved {
            symbol: symbol.0.clone(),
        });
    }

    let missing = table.missing_fields();
    if !missing.is_empty() {
        return Err(Error::Series(core_types::Error::MissingColumns(missing)));
    }

    Ok(table)
}
