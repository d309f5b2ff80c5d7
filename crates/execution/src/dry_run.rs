// In crates/execution/src/dry_run.rs

use crate::{Executor, Result, check_quantity};
use async_trait::async_trait;
use core_types::{Execution, ExecutionStatus, OrderRequest};

/// Reports the order it would place without contacting a broker.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl DryRunExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for DryRunExecutor {
    fn name(&self) -> &'static str {
        "DryRunExecutor"
    }

    async fn execute(&self, order_request: &OrderRequest) -> Result<Execution> {
        check_quantity(order_request)?;

        let message = format!(
            "DRY RUN: would {} {} shares of {}",
            order_request.side, order_request.quantity, order_request.symbol
        );
        tracing::info!(symbol = %order_request.symbol, side = %order_request.side, "{}", message);

        Ok(Execution {
            symbol: order_request.symbol.clone(),
            side: order_request.side,
            quantity: order_request.quantity,
            status: ExecutionStatus::DryRun,
            order_id: None,
            message,
            source_request: order_request.clone(),
        })
    }
}
