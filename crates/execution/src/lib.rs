// In crates/execution/src/lib.rs

use async_trait::async_trait;
use core_types::{Execution, OrderRequest};

pub mod dry_run;
pub mod error;
pub mod live;

// Re-export public types
pub use dry_run::DryRunExecutor;
pub use error::{Error, Result};
pub use live::LiveExecutor;

/// The universal interface for an execution handler.
///
/// An `Executor` takes an `OrderRequest` built from a non-flat signal and
/// either submits it to the broker or reports what it would have done.
#[async_trait]
pub trait Executor: Send + Sync {
    /// The name of the executor (e.g., "LiveExecutor", "DryRunExecutor").
    fn name(&self) -> &'static str;

    /// Executes a given order request.
    ///
    /// # Returns
    ///
    /// The `Execution` record on success, or an `Error` if the order was
    /// rejected before or by the broker.
    async fn execute(&self, order_request: &OrderRequest) -> Result<Execution>;
}

/// Rejects zero and negative quantities before anything is sent.
pub(crate) fn check_quantity(order_request: &OrderRequest) -> Result<()> {
    if order_request.quantity <= rust_decimal::Decimal::ZERO {
        return Err(Error::InvalidQuantity {
            symbol: order_request.symbol.0.clone(),
            quantity: order_request.quantity,
        });
    }
    Ok(())
}
