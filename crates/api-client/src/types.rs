// In crates/api-client/src/types.rs

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

// --- Yahoo Finance chart API ---

/// Top-level envelope of `GET /v8/finance/chart/{symbol}`.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// One symbol's bars. Prices are nested under `indicators.quote[0]` and
/// `indicators.adjclose[0]`, keyed by lower-case field name; missing bars
/// are `null`.
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Bar open times in epoch seconds.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<BTreeMap<String, Vec<Option<f64>>>>,
    #[serde(default)]
    pub adjclose: Vec<BTreeMap<String, Vec<Option<f64>>>>,
}

// --- Client Portal brokerage API ---

/// An entry of `GET /iserver/secdef/search`.
#[derive(Debug, Deserialize, Clone)]
pub struct ContractSearchResult {
    /// The contract id; the gateway sends it as a string or a number.
    pub conid: Option<Value>,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
}

/// One element of the order placement / reply response.
///
/// Either the order was accepted (`order_id`), or the gateway wants a
/// confirmation (`id` + `message`), or it refused (`error`).
#[derive(Debug, Deserialize, Clone, Default)]
pub struct OrderReply {
    pub id: Option<String>,
    #[serde(default)]
    pub message: Vec<String>,
    pub order_id: Option<Value>,
    pub order_status: Option<String>,
    pub error: Option<String>,
}

/// The broker's acknowledgement of a submitted order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAck {
    pub order_id: String,
    pub status: String,
}

/// Renders an id that may arrive as a JSON string or number.
pub(crate) fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
