// In crates/core-types/src/series.rs

use crate::error::{Error, Result};
use crate::types::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The price fields the band engine requires.
///
/// Variants are declared in name order so that sorting yields the
/// alphabetical order of the column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceField {
    Close,
    High,
    Low,
}

impl PriceField {
    pub const REQUIRED: [PriceField; 3] = [PriceField::High, PriceField::Low, PriceField::Close];

    /// The normalised column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Close => "Close",
            PriceField::High => "High",
            PriceField::Low => "Low",
        }
    }
}

/// One time step of price data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub timestamp: Option<DateTime<Utc>>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceRow {
    pub fn new(high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp: None,
            high,
            low,
            close,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A validated, time-ordered sequence of price rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    rows: Vec<PriceRow>,
}

impl PriceSeries {
    /// Wraps `rows`, rejecting any non-finite price and any timestamp that
    /// does not come strictly after the one before it.
    pub fn new(rows: Vec<PriceRow>) -> Result<Self> {
        for (i, pair) in rows.windows(2).enumerate() {
            if let (Some(prev), Some(next)) = (pair[0].timestamp, pair[1].timestamp) {
                if next <= prev {
                    return Err(Error::InvalidParameter(format!(
                        "timestamp at row {} ({}) does not follow row {} ({})",
                        i + 1,
                        next,
                        i,
                        prev
                    )));
                }
            }
        }
        for (i, row) in rows.iter().enumerate() {
            for (field, value) in [
                (PriceField::High, row.high),
                (PriceField::Low, row.low),
                (PriceField::Close, row.close),
            ] {
                if !value.is_finite() {
                    return Err(Error::InvalidParameter(format!(
                        "non-finite {} value at row {}",
                        field.as_str(),
                        i
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.close).collect()
    }
}

/// Column-oriented price data as handed over by a retrieval collaborator:
/// named numeric columns of equal length sharing an optional time index.
///
/// Column names are expected to be normalised already ("High", "Low", "Close").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceTable {
    index: Vec<DateTime<Utc>>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl PriceTable {
    /// An empty, unindexed table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table whose columns must each have one value per timestamp.
    pub fn with_index(index: Vec<DateTime<Utc>>) -> Self {
        Self {
            index,
            columns: BTreeMap::new(),
        }
    }

    /// Builds a table with High/Low/Close columns from rows. Timestamps are
    /// kept only if every row has one.
    pub fn from_rows(rows: &[PriceRow]) -> Self {
        let index: Option<Vec<_>> = rows.iter().map(|r| r.timestamp).collect();
        let mut columns = BTreeMap::new();
        columns.insert("High".to_string(), rows.iter().map(|r| r.high).collect());
        columns.insert("Low".to_string(), rows.iter().map(|r| r.low).collect());
        columns.insert("Close".to_string(), rows.iter().map(|r| r.close).collect());
        Self {
            index: index.unwrap_or_default(),
            columns,
        }
    }

    /// Adds or replaces a column. Fails if its length disagrees with the
    /// index or with the columns already present.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        let expected = if !self.index.is_empty() {
            Some(self.index.len())
        } else {
            self.columns
                .iter()
                .find(|(existing, _)| **existing != name)
                .map(|(_, v)| v.len())
        };
        if let Some(expected) = expected {
            if values.len() != expected {
                return Err(Error::ColumnLength {
                    column: name,
                    expected,
                    actual: values.len(),
                });
            }
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Builder form of [`PriceTable::insert_column`].
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        if !self.index.is_empty() {
            return self.index.len();
        }
        self.columns.values().next().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The required fields this table does not carry, sorted.
    pub fn missing_fields(&self) -> Vec<PriceField> {
        let mut missing: Vec<PriceField> = PriceField::REQUIRED
            .into_iter()
            .filter(|f| !self.columns.contains_key(f.as_str()))
            .collect();
        missing.sort();
        missing
    }

    /// Validates the required columns and converts the table into rows.
    pub fn to_series(&self) -> Result<PriceSeries> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let column = |field: PriceField| self.columns.get(field.as_str()).map(Vec::as_slice).unwrap_or(&[]);
        let (highs, lows, closes) = (column(PriceField::High), column(PriceField::Low), column(PriceField::Close));

        let rows = (0..self.len())
            .map(|i| PriceRow {
                timestamp: self.index.get(i).copied(),
                high: highs[i],
                low: lows[i],
                close: closes[i],
            })
            .collect();

        PriceSeries::new(rows)
    }
}

/// A price row extended with the derived bands and signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandedRow {
    pub row: PriceRow,
    /// `None` while the averaging window is not yet full.
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
    pub signal: Signal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hlc_table() -> PriceTable {
        PriceTable::new()
            .with_column("High", vec![2.0, 3.0])
            .unwrap()
            .with_column("Low", vec![1.0, 2.0])
            .unwrap()
            .with_column("Close", vec![1.5, 2.5])
            .unwrap()
    }

    #[test]
    fn converts_complete_table_into_rows() {
        let series = hlc_table().to_series().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.rows()[1], PriceRow::new(3.0, 2.0, 2.5));
        assert_eq!(series.closes(), vec![1.5, 2.5]);
    }

    #[test]
    fn reports_every_missing_field_sorted() {
        let table = PriceTable::new().with_column("Open", vec![1.0]).unwrap();
        assert_eq!(
            table.to_series().unwrap_err(),
            Error::MissingColumns(vec![PriceField::Close, PriceField::High, PriceField::Low])
        );

        let table = PriceTable::new()
            .with_column("High", vec![1.0])
            .unwrap()
            .with_column("Close", vec![1.0])
            .unwrap();
        assert_eq!(table.missing_fields(), vec![PriceField::Low]);
    }

    #[test]
    fn rejects_column_of_wrong_length() {
        let err = hlc_table().with_column("Open", vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::ColumnLength {
                column: "Open".to_string(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn replacing_the_only_column_is_allowed() {
        let mut table = PriceTable::new().with_column("High", vec![1.0]).unwrap();
        table.insert_column("High", vec![1.0, 2.0]).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn indexed_table_carries_timestamps_into_rows() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let table = PriceTable::with_index(vec![t0, t1])
            .with_column("High", vec![2.0, 3.0])
            .unwrap()
            .with_column("Low", vec![1.0, 2.0])
            .unwrap()
            .with_column("Close", vec![1.5, 2.5])
            .unwrap();
        let series = table.to_series().unwrap();
        assert_eq!(series.rows()[0].timestamp, Some(t0));
        assert_eq!(series.rows()[1].timestamp, Some(t1));

        assert!(PriceTable::with_index(vec![t0]).with_column("High", vec![]).is_err());
    }

    #[test]
    fn rejects_non_finite_prices() {
        let table = PriceTable::new()
            .with_column("High", vec![f64::NAN])
            .unwrap()
            .with_column("Low", vec![1.0])
            .unwrap()
            .with_column("Close", vec![1.0])
            .unwrap();
        assert!(matches!(table.to_series(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn rejects_out_of_order_timestamps() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let row = PriceRow::new(2.0, 1.0, 1.5);

        let descending = PriceSeries::new(vec![row.at(t1), row.at(t0)]);
        assert!(matches!(descending, Err(Error::InvalidParameter(_))));

        let repeated = PriceSeries::new(vec![row.at(t0), row.at(t0)]);
        assert!(matches!(repeated, Err(Error::InvalidParameter(_))));

        assert_eq!(PriceSeries::new(vec![row.at(t0), row.at(t1)]).unwrap().len(), 2);
    }

    #[test]
    fn round_trips_rows_through_table() {
        let rows = vec![PriceRow::new(1.0, 0.5, 0.75), PriceRow::new(2.0, 1.5, 1.75)];
        let series = PriceTable::from_rows(&rows).to_series().unwrap();
        assert_eq!(series.rows(), rows.as_slice());
    }
}
