// In crates/core-types/src/error.rs

use crate::series::PriceField;
use thiserror::Error;

/// Failures raised while validating price data or computing bands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid averaging method '{0}': expected 'simple', 'exponential', or 'triangular'")]
    InvalidMethod(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Price table missing required columns: [{}]", join_fields(.0))]
    MissingColumns(Vec<PriceField>),

    #[error("Price series is empty")]
    EmptySeries,

    #[error("Column '{column}' has {actual} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },
}

fn join_fields(fields: &[PriceField]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{}\"", f.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_fields() {
        let err = Error::MissingColumns(vec![PriceField::High, PriceField::Low]);
        assert_eq!(
            err.to_string(),
            "Price table missing required columns: [\"High\", \"Low\"]"
        );
    }
}
