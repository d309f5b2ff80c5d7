// In crates/api-client/src/broker.rs

use crate::types::{value_to_id, ContractSearchResult, OrderAck, OrderReply};
use crate::{Error, Result};
use app_config::BrokerSettings;
use core_types::{Side, Symbol};
use num_traits::ToPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

/// Client for a locally running Client Portal gateway.
///
/// The gateway must already be authenticated; this client never logs in.
#[derive(Debug, Clone)]
pub struct BrokerClient {
    http_client: Client,
    base_url: String,
    account_id: Option<String>,
    max_confirmations: u32,
}

impl BrokerClient {
    pub fn new(settings: &BrokerSettings) -> Result<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            account_id: settings.account_id.clone().filter(|a| !a.is_empty()),
            max_confirmations: settings.max_confirmations,
        })
    }

    /// Looks up the stock contract id for `symbol`.
    ///
    /// This corresponds to the `GET /iserver/secdef/search` endpoint.
    pub async fn resolve_contract(&self, symbol: &Symbol) -> Result<String> {
        let url = format!("{}/iserver/secdef/search", self.base_url);
        let request = self
            .http_client
            .get(&url)
            .query(&[("symbol", symbol.as_str()), ("secType", "STK")]);
        let results: Vec<ContractSearchResult> = self.send(request).await?;

        results
            .iter()
            .find_map(|r| r.conid.as_ref().and_then(value_to_id))
            .ok_or_else(|| Error::ContractNotFound {
                symbol: symbol.0.clone(),
            })
    }

    /// Places a day market order and answers the gateway's confirmation
    /// prompts until it hands back an order id.
    ///
    /// This corresponds to `POST /iserver/account/{accountId}/orders`,
    /// followed by `POST /iserver/reply/{replyId}` per prompt.
    pub async fn place_market_order(&self, symbol: &Symbol, side: Side, quantity: Decimal) -> Result<OrderAck> {
        let account_id = self.account_id.as_deref().ok_or(Error::MissingAccount)?;
        let quantity = quantity
            .to_f64()
            .filter(|q| *q > 0.0)
            .ok_or_else(|| Error::OrderRejected(format!("invalid quantity {}", quantity)))?;
        let conid = self.resolve_contract(symbol).await?;

        // --- 1. Submit the order ---
        let body = json!({
            "orders": [{
                "conid": conid.parse::<i64>().map(Value::from).unwrap_or(Value::String(conid.clone())),
                "orderType": "MKT",
                "side": side.to_string(),
                "quantity": quantity,
                "tif": "DAY",
            }]
        });
        tracing::info!(symbol = %symbol, %side, quantity, conid = %conid, "Submitting market order.");

        let url = format!("{}/iserver/account/{}/orders", self.base_url, account_id);
        let mut replies: Vec<OrderReply> = self.send(self.http_client.post(&url).json(&body)).await?;

        // --- 2. Answer confirmation prompts ---
        let mut confirmations = 0;
        loop {
            let reply = replies
                .into_iter()
                .next()
                .ok_or_else(|| Error::OrderRejected("empty reply from gateway".to_string()))?;

            if let Some(error) = reply.error {
                return Err(Error::OrderRejected(error));
            }
            if let Some(order_id) = reply.order_id.as_ref().and_then(value_to_id) {
                return Ok(OrderAck {
                    order_id,
                    status: reply.order_status.unwrap_or_else(|| "Submitted".to_string()),
                });
            }
            let Some(reply_id) = reply.id else {
                return Err(Error::OrderRejected("gateway reply carried no order id".to_string()));
            };
            if confirmations >= self.max_confirmations {
                return Err(Error::OrderRejected(format!(
                    "gave up after {} confirmation prompts",
                    confirmations
                )));
            }

            confirmations += 1;
            tracing::debug!(reply_id = %reply_id, message = ?reply.message, "Confirming order prompt.");
            let url = format!("{}/iserver/reply/{}", self.base_url, reply_id);
            replies = self
                .send(self.http_client.post(&url).json(&json!({ "confirmed": true })))
                .await?;
        }
    }

    /// Sends a request and decodes the body, surfacing the gateway's
    /// `{"error": ...}` objects as [`Error::ApiError`].
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(Error::RequestFailed)?;
        let status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            if status.is_success() {
                Error::DeserializationFailed(e)
            } else {
                Error::ApiError {
                    code: status.as_u16().to_string(),
                    msg: text.clone(),
                }
            }
        })?;

        if let Some(msg) = value.get("error").and_then(Value::as_str) {
            return Err(Error::ApiError {
                code: status.as_u16().to_string(),
                msg: msg.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Error::ApiError {
                code: status.as_u16().to_string(),
                msg: text,
            });
        }

        serde_json::from_value(value).map_err(Error::DeserializationFailed)
    }
}
