// In crates/execution/src/live.rs

use crate::{Error, Executor, Result, check_quantity};
use api_client::BrokerClient;
use async_trait::async_trait;
use core_types::{Execution, ExecutionStatus, OrderRequest};

/// An executor that places real market orders through the brokerage gateway.
#[derive(Debug, Clone)]
pub struct LiveExecutor {
    broker: BrokerClient,
}

impl LiveExecutor {
    pub fn new(broker: BrokerClient) -> Self {
        Self { broker }
    }
}

#[async_trait]
impl Executor for LiveExecutor {
    fn name(&self) -> &'static str {
        "LiveExecutor"
    }

    async fn execute(&self, order_request: &OrderRequest) -> Result<Execution> {
        tracing::info!(?order_request, "Executing live order request...");
        check_quantity(order_request)?;

        // --- 1. Place the market order ---
        let ack = self
            .broker
            .place_market_order(&order_request.symbol, order_request.side, order_request.quantity)
            .await
            .map_err(|source| {
                tracing::error!(error = %source, symbol = %order_request.symbol, "Failed to place market order.");
                Error::Broker {
                    symbol: order_request.symbol.0.clone(),
                    side: order_request.side,
                    source,
                }
            })?;
        tracing::info!(order_id = %ack.order_id, status = %ack.status, "Market order accepted.");

        // --- 2. Build the execution record ---
        Ok(Execution {
            symbol: order_request.symbol.clone(),
            side: order_request.side,
            quantity: order_request.quantity,
            status: ExecutionStatus::Submitted,
            order_id: Some(ack.order_id),
            message: format!(
                "Placed {} order for {} shares of {}",
                order_request.side, order_request.quantity, order_request.symbol
            ),
            source_request: order_request.clone(),
        })
    }
}
