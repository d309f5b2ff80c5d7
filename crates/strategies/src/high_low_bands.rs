// In crates/strategies/src/high_low_bands.rs

use crate::moving_average::moving_average;
use crate::types::HighLowBandSettings;
use crate::Strategy;
use core_types::{AveragingMethod, BandedRow, Error, PriceSeries, PriceTable, Result, Signal};

/// Computes the high/low bands and the per-row signal for a price table.
///
/// The upper band is the smoothed High raised by `offset_percent`, the lower
/// band the smoothed Low lowered by the same percentage. Fails with
/// `MissingColumns` before doing any work if High, Low or Close is absent.
pub fn compute_bands(
    table: &PriceTable,
    method: AveragingMethod,
    periods: usize,
    offset_percent: f64,
) -> Result<Vec<BandedRow>> {
    let series = table.to_series()?;
    band_series(&series, method, periods, offset_percent)
}

/// [`compute_bands`] for an already validated series.
pub fn band_series(
    series: &PriceSeries,
    method: AveragingMethod,
    periods: usize,
    offset_percent: f64,
) -> Result<Vec<BandedRow>> {
    if !offset_percent.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "offset must be a finite percentage, got {}",
            offset_percent
        )));
    }

    let ma_high = moving_average(&series.highs(), method, periods)?;
    let ma_low = moving_average(&series.lows(), method, periods)?;

    let upper_factor = 1.0 + offset_percent / 100.0;
    let lower_factor = 1.0 - offset_percent / 100.0;

    let banded = series
        .rows()
        .iter()
        .zip(ma_high.into_iter().zip(ma_low))
        .map(|(row, (high, low))| {
            let upper_band = high.map(|h| h * upper_factor);
            let lower_band = low.map(|l| l * lower_factor);
            BandedRow {
                row: *row,
                upper_band,
                lower_band,
                signal: classify(row.close, upper_band, lower_band),
            }
        })
        .collect();

    Ok(banded)
}

/// Classifies a close against its bands. Upper breakouts take precedence,
/// comparisons are strict, and an undefined band always yields `Flat`.
pub fn classify(close: f64, upper_band: Option<f64>, lower_band: Option<f64>) -> Signal {
    let (Some(upper), Some(lower)) = (upper_band, lower_band) else {
        return Signal::Flat;
    };

    if close > upper {
        Signal::Buy
    } else if close < lower {
        Signal::Sell
    } else {
        Signal::Flat
    }
}

/// The signal of the most recent row.
pub fn latest_signal(
    table: &PriceTable,
    method: AveragingMethod,
    periods: usize,
    offset_percent: f64,
) -> Result<Signal> {
    let banded = compute_bands(table, method, periods, offset_percent)?;
    banded.last().map(|row| row.signal).ok_or(Error::EmptySeries)
}

/// The high/low band breakout strategy.
#[derive(Debug, Clone)]
pub struct HighLowBands {
    settings: HighLowBandSettings,
}

impl HighLowBands {
    /// Creates the strategy, rejecting a zero window or a non-finite offset.
    pub fn new(settings: HighLowBandSettings) -> Result<Self> {
        if settings.periods < 1 {
            return Err(Error::InvalidParameter(
                "periods must be a positive integer, got 0".to_string(),
            ));
        }
        if !settings.offset.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "offset must be a finite percentage, got {}",
                settings.offset
            )));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &HighLowBandSettings {
        &self.settings
    }

    /// The full banded table for `table`.
    pub fn bands(&self, table: &PriceTable) -> Result<Vec<BandedRow>> {
        compute_bands(
            table,
            self.settings.method,
            self.settings.periods,
            self.settings.offset,
        )
    }
}

impl Strategy for HighLowBands {
    fn name(&self) -> &'static str {
        "HighLowBands"
    }

    fn assess(&self, table: &PriceTable) -> Result<Signal> {
        latest_signal(
            table,
            self.settings.method,
            self.settings.periods,
            self.settings.offset,
        )
    }
}
