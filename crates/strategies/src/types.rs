// In crates/strategies/src/types.rs

use core_types::AveragingMethod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct HighLowBandSettings {
    /// Kernel used to smooth the High and Low series.
    #[serde(default)]
    pub method: AveragingMethod,

    /// Window length of the moving average.
    #[serde(default = "default_periods")]
    pub periods: usize,

    /// Band offset in percent of the smoothed price (2.0 means 2%).
    #[serde(default = "default_offset")]
    pub offset: f64,
}

impl Default for HighLowBandSettings {
    fn default() -> Self {
        Self {
            method: AveragingMethod::default(),
            periods: default_periods(),
            offset: default_offset(),
        }
    }
}

fn default_periods() -> usize {
    20
}

fn default_offset() -> f64 {
    2.0
}
