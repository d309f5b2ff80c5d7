// In app/src/report.rs

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use core_types::{BandedRow, Signal};
use engine::{TradeJob, TradeOutcome};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// One line of the signal log: what was evaluated and what happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRecord {
    pub timestamp: String,
    pub symbol: String,
    pub method: String,
    pub periods: usize,
    pub offset: f64,
    pub quantity: String,
    pub signal: i8,
    pub side: String,
    pub message: String,
}

impl SignalRecord {
    pub fn success(at: DateTime<Utc>, job: &TradeJob, outcome: &TradeOutcome) -> Self {
        Self::build(at, job, outcome.signal, outcome.message().to_string())
    }

    /// A failed symbol is logged as flat with the error chain as its message.
    pub fn failure(at: DateTime<Utc>, job: &TradeJob, error: &anyhow::Error) -> Self {
        Self::build(at, job, Signal::Flat, format!("{:#}", error))
    }

    fn build(at: DateTime<Utc>, job: &TradeJob, signal: Signal, message: String) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            symbol: job.symbol.to_string(),
            method: job.bands.method.to_string(),
            periods: job.bands.periods,
            offset: job.bands.offset,
            quantity: job.quantity.to_string(),
            signal: signal.value(),
            side: signal.label().to_string(),
            message,
        }
    }
}

/// Appends records to `path`, creating it if needed. The header row is
/// written only when the file is new or empty.
pub fn append_records(path: &Path, records: &[SignalRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open report file {}", path.display()))?;
    let write_header = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), count = records.len(), "Appended signal records.");
    Ok(())
}

#[derive(Debug, Serialize)]
struct BandRecord {
    timestamp: Option<String>,
    high: f64,
    low: f64,
    close: f64,
    upper_band: Option<f64>,
    lower_band: Option<f64>,
    signal: i8,
}

/// Writes the full banded table as CSV. Undefined bands are empty fields.
pub fn write_bands<W: Write>(writer: W, rows: &[BandedRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for banded in rows {
        writer.serialize(BandRecord {
            timestamp: banded
                .row
                .timestamp
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            high: banded.row.high,
            low: banded.row.low,
            close: banded.row.close,
            upper_band: banded.upper_band,
            lower_band: banded.lower_band,
            signal: banded.signal.value(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
