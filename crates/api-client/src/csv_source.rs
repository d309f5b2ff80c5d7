// In crates/api-client/src/csv_source.rs

use crate::market_data::{MarketDataProvider, validate_table};
use crate::normalize::{is_index_column, normalize_column_name, parse_timestamp};
use crate::{Error, Result};
use async_trait::async_trait;
use core_types::{PriceField, PriceTable, Symbol};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads price history from `{dir}/{SYMBOL}.csv`.
///
/// Useful for back-filled data and for running without network access. The
/// requested interval and lookback are ignored: the file is used as-is.
#[derive(Debug, Clone)]
pub struct CsvMarketData {
    dir: PathBuf,
}

impl CsvMarketData {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.dir.join(format!("{}.csv", symbol.0))
    }
}

#[async_trait]
impl MarketDataProvider for CsvMarketData {
    fn name(&self) -> &'static str {
        "CsvFiles"
    }

    async fn fetch(&self, symbol: &Symbol, _interval: &str, _lookback: &str) -> Result<PriceTable> {
        let path = self.path_for(symbol);
        tracing::debug!(symbol = %symbol, path = %path.display(), "Reading price file.");
        let table = read_price_csv(&path)?;
        validate_table(symbol, table)
    }
}

/// Reads a price CSV from disk. See [`parse_price_csv`].
pub fn read_price_csv(path: &Path) -> Result<PriceTable> {
    let file = std::fs::File::open(path)?;
    parse_price_csv(file)
}

/// Parses a price CSV into a table with normalised column names.
///
/// The first column is used as the time index when its header is one of
/// `Date`, `Datetime`, `Timestamp`, `Time` or `Price`. The extra header rows
/// pandas writes for multi-level yfinance frames (`Ticker,AAPL,...` and
/// `Date,,,`) are skipped, as are rows with an empty High, Low or Close.
/// Other empty fields are read as NaN.
pub fn parse_price_csv<R: Read>(reader: R) -> Result<PriceTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(normalize_column_name).collect();
    let has_index = headers.first().is_some_and(|h| is_index_column(h));
    let value_start = usize::from(has_index);

    for (i, name) in headers.iter().enumerate().skip(value_start) {
        if name.is_empty() {
            return Err(Error::InvalidData(format!("column {} has no header", i + 1)));
        }
        if headers[value_start..i].contains(name) {
            return Err(Error::InvalidData(format!("duplicate column '{}'", name)));
        }
    }

    let required: Vec<usize> = headers[value_start..]
        .iter()
        .enumerate()
        .filter(|(_, name)| PriceField::REQUIRED.iter().any(|f| f.as_str() == name.as_str()))
        .map(|(i, _)| i)
        .collect();

    let mut index = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - value_start];
    let mut skipped = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let first = record.get(0).unwrap_or_default();
        let values: Vec<&str> = record.iter().skip(value_start).collect();

        if first.eq_ignore_ascii_case("ticker") || values.iter().all(|v| v.is_empty()) {
            continue;
        }
        if values.len() != columns.len() || required.iter().any(|&i| values[i].is_empty()) {
            skipped += 1;
            continue;
        }

        if has_index {
            let ts = parse_timestamp(first).ok_or_else(|| {
                Error::InvalidData(format!("row {}: unreadable timestamp '{}'", line + 2, first))
            })?;
            index.push(ts);
        }
        for (column, raw) in columns.iter_mut().zip(values) {
            if raw.is_empty() {
                column.push(f64::NAN);
                continue;
            }
            let value: f64 = raw.parse().map_err(|_| {
                Error::InvalidData(format!("row {}: '{}' is not a number", line + 2, raw))
            })?;
            column.push(value);
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Skipped incomplete rows.");
    }

    let mut table = PriceTable::with_index(index);
    for (name, values) in headers.into_iter().skip(value_start).zip(columns) {
        table.insert_column(name, values)?;
    }
    Ok(table)
}
