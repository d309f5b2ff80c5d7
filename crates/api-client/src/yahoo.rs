// In crates/api-client/src/yahoo.rs

use crate::market_data::{MarketDataProvider, validate_table};
use crate::normalize::normalize_column_name;
use crate::types::{ChartResponse, ChartResult};
use crate::{Error, Result};
use app_config::MarketDataSettings;
use async_trait::async_trait;
use chrono::DateTime;
use core_types::{PriceField, PriceTable, Symbol};
use reqwest::{Client, Url};
use std::time::Duration;

/// Yahoo rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64)";

/// Client for the Yahoo Finance chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http_client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.clone(),
        })
    }

    /// Fetches the chart for `symbol` and flattens it into a price table.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    pub async fn get_chart(&self, symbol: &Symbol, interval: &str, range: &str) -> Result<PriceTable> {
        let mut url = Url::parse(&self.base_url).map_err(|e| Error::ClientBuildError(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::ClientBuildError(format!("base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol.as_str()]);

        tracing::debug!(%url, interval, range, "Requesting chart data.");

        let response_body = self
            .http_client
            .get(url)
            .query(&[("interval", interval), ("range", range), ("includeAdjustedClose", "true")])
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        // Yahoo answers unknown symbols with a 404 whose body still carries `chart.error`.
        let response: ChartResponse = serde_json::from_str(&response_body)?;
        if let Some(err) = response.chart.error {
            return Err(Error::ApiError {
                code: err.code,
                msg: err.description,
            });
        }

        let result = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| Error::NoDataRetrieved {
                symbol: symbol.0.clone(),
            })?;

        let table = chart_to_table(result)?;
        tracing::debug!(symbol = %symbol, rows = table.len(), "Chart data received.");
        validate_table(symbol, table)
    }
}

/// Flattens the nested chart payload into a table with normalised column
/// names. Bars with a `null` High, Low or Close are dropped; a `null` in
/// any other field is kept as NaN.
pub fn chart_to_table(result: ChartResult) -> Result<PriceTable> {
    let mut columns: Vec<(String, Vec<Option<f64>>)> = Vec::new();
    let nested = result
        .indicators
        .quote
        .into_iter()
        .take(1)
        .chain(result.indicators.adjclose.into_iter().take(1));
    for block in nested {
        for (name, values) in block {
            columns.push((normalize_column_name(&name), values));
        }
    }

    let rows = result.timestamp.len();
    for (name, values) in &columns {
        if values.len() != rows {
            return Err(Error::InvalidData(format!(
                "column '{}' has {} values for {} timestamps",
                name,
                values.len(),
                rows
            )));
        }
    }

    let required: Vec<&Vec<Option<f64>>> = columns
        .iter()
        .filter(|(name, _)| PriceField::REQUIRED.iter().any(|f| f.as_str() == name.as_str()))
        .map(|(_, values)| values)
        .collect();
    let keep: Vec<usize> = (0..rows)
        .filter(|&i| required.iter().all(|values| values[i].is_some()))
        .collect();
    if keep.len() < rows {
        tracing::debug!(dropped = rows - keep.len(), "Dropped bars with missing prices.");
    }

    let index = keep
        .iter()
        .map(|&i| {
            let secs = result.timestamp[i];
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| Error::InvalidData(format!("timestamp out of range: {}", secs)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut table = PriceTable::with_index(index);
    for (name, values) in columns {
        let kept = keep.iter().map(|&i| values[i].unwrap_or(f64::NAN)).collect();
        table.insert_column(name, kept)?;
    }

    Ok(table)
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    fn name(&self) -> &'static str {
        "YahooFinance"
    }

    async fn fetch(&self, symbol: &Symbol, interval: &str, lookback: &str) -> Result<PriceTable> {
        self.get_chart(symbol, interval, lookback).await
    }
}
