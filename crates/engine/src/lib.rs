// In crates/engine/src/lib.rs

pub mod job;

pub use job::{JobDefaults, TradeJob};

use anyhow::{Context, Result};
use api_client::MarketDataProvider;
use core_types::{Execution, OrderRequest, Signal};
use execution::Executor;
use futures::future;
use std::sync::Arc;
use strategies::{HighLowBands, Strategy};

/// What the engine did with a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The signal was flat; the executor was not called.
    NoTrade,
    /// The order was handed to the executor.
    Executed(Execution),
}

/// The result of one symbol's pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub signal: Signal,
    pub action: Action,
}

impl TradeOutcome {
    /// One-line summary for logs and reports.
    pub fn message(&self) -> &str {
        match &self.action {
            Action::NoTrade => "No trade signal",
            Action::Executed(execution) => &execution.message,
        }
    }
}

/// One entry of a scan: the job and how it went.
#[derive(Debug)]
pub struct ScanEntry {
    pub job: TradeJob,
    pub outcome: Result<TradeOutcome>,
}

/// Runs the fetch → assess → route pipeline for single symbols or whole
/// watchlists.
pub struct Engine {
    provider: Arc<dyn MarketDataProvider>,
    executor: Arc<dyn Executor>,
}

impl Engine {
    pub fn new(provider: Arc<dyn MarketDataProvider>, executor: Arc<dyn Executor>) -> Self {
        Self { provider, executor }
    }

    /// Fetches prices for the job's symbol, evaluates the latest band
    /// signal and routes it to the executor.
    pub async fn run_symbol(&self, job: &TradeJob) -> Result<TradeOutcome> {
        // --- 1. Validate the band settings before touching the network ---
        let strategy = HighLowBands::new(job.bands)?;

        // --- 2. Fetch ---
        let table = self
            .provider
            .fetch(&job.symbol, &job.interval, &job.lookback)
            .await
            .with_context(|| format!("{} could not fetch prices for {}", self.provider.name(), job.symbol))?;
        tracing::debug!(symbol = %job.symbol, rows = table.len(), "Fetched price history.");

        // --- 3. Assess ---
        let signal = strategy
            .assess(&table)
            .with_context(|| format!("{} failed for {}", strategy.name(), job.symbol))?;

        // --- 4. Route ---
        let Some(order_request) = OrderRequest::from_signal(job.symbol.clone(), signal, job.quantity) else {
            tracing::info!(symbol = %job.symbol, "No trade signal.");
            return Ok(TradeOutcome {
                signal,
                action: Action::NoTrade,
            });
        };

        tracing::info!(symbol = %job.symbol, %signal, executor = self.executor.name(), "Routing signal to executor.");
        let execution = self.executor.execute(&order_request).await?;

        Ok(TradeOutcome {
            signal,
            action: Action::Executed(execution),
        })
    }

    /// Runs every job concurrently. A failing symbol does not stop the
    /// others; results come back in input order.
    pub async fn scan(&self, jobs: Vec<TradeJob>) -> Vec<ScanEntry> {
        tracing::info!(count = jobs.len(), "Scanning symbols.");

        let runs = jobs.iter().map(|job| self.run_symbol(job));
        let outcomes = future::join_all(runs).await;

        let entries: Vec<ScanEntry> = jobs
            .into_iter()
            .zip(outcomes)
            .map(|(job, outcome)| {
                if let Err(e) = &outcome {
                    tracing::error!(symbol = %job.symbol, error = %format!("{:#}", e), "Symbol failed.");
                }
                ScanEntry { job, outcome }
            })
            .collect();

        let failed = entries.iter().filter(|e| e.outcome.is_err()).count();
        tracing::info!(total = entries.len(), failed, "Scan complete.");
        entries
    }
}
