// In crates/strategies/src/lib.rs

use core_types::{PriceTable, Result, Signal};

pub mod factory;
pub mod high_low_bands;
pub mod moving_average;
pub mod types;

pub use factory::create_strategy;
pub use high_low_bands::{HighLowBands, band_series, classify, compute_bands, latest_signal};
pub use moving_average::moving_average;
pub use types::HighLowBandSettings;

/// The universal interface for a trading strategy.
///
/// A strategy turns a table of recent prices into a trading `Signal`. It keeps
/// no state between calls: the same table always yields the same signal.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Evaluates the table and returns the signal for its most recent row.
    fn assess(&self, table: &PriceTable) -> Result<Signal>;
}
