// In crates/execution/src/error.rs

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Order quantity for {symbol} must be positive, got {quantity}")]
    InvalidQuantity { symbol: String, quantity: Decimal },

    #[error("Broker refused the {side} order for {symbol}: {source}")]
    Broker {
        symbol: String,
        side: core_types::Side,
        #[source]
        source: api_client::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
