// In crates/core-types/src/lib.rs

pub mod error;
pub mod series;
pub mod strategy;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use series::{BandedRow, PriceField, PriceRow, PriceSeries, PriceTable};
pub use strategy::StrategyConfig;
pub use types::{AveragingMethod, Execution, ExecutionStatus, OrderRequest, Side, Signal, Symbol};
