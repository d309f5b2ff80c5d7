// In crates/core-types/src/types.rs

use crate::error::Error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A ticker symbol as understood by the data provider and the broker (e.g., "AAPL").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Trims surrounding whitespace and upper-cases the ticker.
    pub fn new(raw: &str) -> Self {
        Symbol(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The smoothing kernel used to build the bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AveragingMethod {
    #[default]
    Simple,
    Exponential,
    Triangular,
}

impl AveragingMethod {
    pub const ALL: [AveragingMethod; 3] = [
        AveragingMethod::Simple,
        AveragingMethod::Exponential,
        AveragingMethod::Triangular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AveragingMethod::Simple => "simple",
            AveragingMethod::Exponential => "exponential",
            AveragingMethod::Triangular => "triangular",
        }
    }
}

impl FromStr for AveragingMethod {
    type Err = Error;

    /// Parses a method name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(AveragingMethod::Simple),
            "exponential" => Ok(AveragingMethod::Exponential),
            "triangular" => Ok(AveragingMethod::Triangular),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for AveragingMethod {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AveragingMethod> for String {
    fn from(method: AveragingMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for AveragingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The side of a market order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The discrete trade decision derived from a close price and its bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Signal {
    /// Close broke below the lower band.
    Sell,
    /// No breakout, or the bands were not yet defined.
    #[default]
    Flat,
    /// Close broke above the upper band.
    Buy,
}

impl Signal {
    /// The numeric encoding: +1 buy, 0 none, -1 sell.
    pub fn value(self) -> i8 {
        match self {
            Signal::Sell => -1,
            Signal::Flat => 0,
            Signal::Buy => 1,
        }
    }

    /// The order side this signal asks for, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Signal::Buy => Some(Side::Buy),
            Signal::Sell => Some(Side::Sell),
            Signal::Flat => None,
        }
    }

    /// BUY / SELL / NONE, as written to reports.
    pub fn label(self) -> &'static str {
        self.side().map(|s| s.as_str()).unwrap_or("NONE")
    }
}

impl From<Signal> for i8 {
    fn from(signal: Signal) -> Self {
        signal.value()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A request to place a market order, produced from a non-flat signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: Side,
    /// Number of shares; fractional quantities are passed through unchanged.
    pub quantity: Decimal,
    /// The signal that triggered this order.
    pub originating_signal: Signal,
}

impl OrderRequest {
    /// Builds an order for `signal`, or `None` when the signal is flat.
    pub fn from_signal(symbol: Symbol, signal: Signal, quantity: Decimal) -> Option<Self> {
        signal.side().map(|side| OrderRequest {
            symbol,
            side,
            quantity,
            originating_signal: signal,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// The broker accepted the order.
    Submitted,
    /// The order was only reported, never sent.
    DryRun,
}

/// The outcome of handing an `OrderRequest` to an executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: Decimal,
    pub status: ExecutionStatus,
    /// Broker-assigned order id, when one was returned.
    pub order_id: Option<String>,
    /// Human-readable summary of what happened.
    pub message: String,
    pub source_request: OrderRequest,
}
