// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("No data returned for {symbol}; check ticker or interval")]
    NoDataRetrieved { symbol: String },
    #[error("Invalid price data: {0}")]
    InvalidData(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Series(#[from] core_types::Error),
    #[error("No brokerage account configured (set broker.account_id)")]
    MissingAccount,
    #[error("No stock contract found for {symbol}")]
    ContractNotFound { symbol: String },
    #[error("Order rejected: {0}")]
    OrderRejected(String),
}

pub type Result<T> = std::result::Result<T, Error>;
