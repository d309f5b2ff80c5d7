// In crates/api-client/src/lib.rs

pub mod broker;
pub mod csv_source;
pub mod error;
pub mod market_data;
pub mod normalize;
pub mod types;
pub mod yahoo;

// Re-export public types
pub use broker::BrokerClient;
pub use csv_source::{CsvMarketData, parse_price_csv, read_price_csv};
pub use error::{Error, Result};
pub use market_data::{MarketDataProvider, validate_table};
pub use types::OrderAck;
pub use yahoo::YahooClient;
