// In app/src/main.rs

use anyhow::{Context, Result};
use api_client::{BrokerClient, CsvMarketData, MarketDataProvider, YahooClient};
use app_config::Settings;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use core_types::{AveragingMethod, Symbol};
use engine::{Engine, JobDefaults, ScanEntry, TradeJob};
use execution::{DryRunExecutor, Executor, LiveExecutor};
use report::SignalRecord;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strategies::{HighLowBandSettings, HighLowBands};

mod logging;
mod report;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "High/low moving-average band signals for stocks.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates one symbol and routes its signal.
    Signal {
        /// The ticker to evaluate (e.g., "AAPL").
        #[arg(short, long)]
        symbol: String,

        #[command(flatten)]
        trade: TradeArgs,
    },

    /// Evaluates several symbols concurrently.
    Scan {
        /// Comma-separated tickers; the watchlist is used when omitted.
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Watchlist file with `[[symbols]]` entries.
        #[arg(long, default_value = app_config::WATCHLIST_FILE)]
        watchlist: PathBuf,

        #[command(flatten)]
        trade: TradeArgs,
    },

    /// Computes the banded table for a local price file.
    Bands {
        /// CSV with High, Low and Close columns.
        #[arg(short, long)]
        file: PathBuf,

        #[command(flatten)]
        band: BandArgs,

        /// Where to write the table; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Band parameters; each one overrides its configured default.
#[derive(Args, Debug, Clone, Default)]
struct BandArgs {
    /// simple, exponential or triangular.
    #[arg(long)]
    method: Option<AveragingMethod>,

    /// Moving-average window.
    #[arg(long)]
    periods: Option<usize>,

    /// Band offset in percent (2.0 means 2%).
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f64>,
}

impl BandArgs {
    fn apply(&self, bands: &mut HighLowBandSettings) {
        if let Some(method) = self.method {
            bands.method = method;
        }
        if let Some(periods) = self.periods {
            bands.periods = periods;
        }
        if let Some(offset) = self.offset {
            bands.offset = offset;
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
struct TradeArgs {
    #[command(flatten)]
    band: BandArgs,

    /// Shares per order.
    #[arg(long)]
    quantity: Option<Decimal>,

    /// Bar size (e.g., "1d", "1h").
    #[arg(long)]
    interval: Option<String>,

    /// History window (e.g., "60d").
    #[arg(long)]
    lookback: Option<String>,

    /// Read `{DIR}/{SYMBOL}.csv` instead of downloading.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Never send orders, even when live trading is enabled.
    #[arg(long)]
    dry_run: bool,

    /// Append one record per symbol to this CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl TradeArgs {
    /// Command-line values win over the watchlist and configuration.
    fn apply(&self, job: &mut TradeJob) {
        self.band.apply(&mut job.bands);
        if let Some(quantity) = self.quantity {
            job.quantity = quantity;
        }
        if let Some(interval) = &self.interval {
            job.interval = interval.clone();
        }
        if let Some(lookback) = &self.lookback {
            job.lookback = lookback.clone();
        }
    }
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings().context("Failed to load settings")?;
    logging::init(&settings.app)?;

    tracing::debug!(environment = %settings.app.environment, "Settings loaded.");

    match cli.command {
        Commands::Signal { symbol, trade } => handle_signal(&settings, symbol, trade).await,
        Commands::Scan {
            symbols,
            watchlist,
            trade,
        } => handle_scan(&settings, symbols, &watchlist, trade).await,
        Commands::Bands { file, band, output } => handle_bands(&settings, &file, &band, output.as_deref()),
    }
}

// --- Wiring ---

fn build_engine(settings: &Settings, trade: &TradeArgs) -> Result<Engine> {
    let data_dir = trade
        .data_dir
        .clone()
        .or_else(|| settings.market_data.data_dir.clone());
    let provider: Arc<dyn MarketDataProvider> = match data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Reading prices from local files.");
            Arc::new(CsvMarketData::new(dir))
        }
        None => Arc::new(YahooClient::new(&settings.market_data)?),
    };

    let executor: Arc<dyn Executor> = if settings.app.live_trading_enabled && !trade.dry_run {
        tracing::warn!("LIVE TRADING IS ENABLED. REAL ORDERS WILL BE PLACED.");
        Arc::new(LiveExecutor::new(BrokerClient::new(&settings.broker)?))
    } else {
        Arc::new(DryRunExecutor::new())
    };

    Ok(Engine::new(provider, executor))
}

fn report_path(settings: &Settings, trade: &TradeArgs) -> Option<PathBuf> {
    trade.csv.clone().or_else(|| settings.report.path.clone())
}

// --- "Signal" Subcommand Logic ---

async fn handle_signal(settings: &Settings, symbol: String, trade: TradeArgs) -> Result<()> {
    let mut job = TradeJob::new(Symbol::new(&symbol), &JobDefaults::from_settings(settings));
    trade.apply(&mut job);

    let engine = build_engine(settings, &trade)?;
    let outcome = engine.run_symbol(&job).await;

    let record = match &outcome {
        Ok(outcome) => SignalRecord::success(Utc::now(), &job, outcome),
        Err(e) => SignalRecord::failure(Utc::now(), &job, e),
    };
    if let Some(path) = report_path(settings, &trade) {
        report::append_records(&path, std::slice::from_ref(&record))?;
    }

    let outcome = outcome?;
    println!("{}: signal {} ({}) {}", job.symbol, outcome.signal, outcome.signal.label(), outcome.message());
    Ok(())
}

// --- "Scan" Subcommand Logic ---

async fn handle_scan(settings: &Settings, symbols: Vec<String>, watchlist: &Path, trade: TradeArgs) -> Result<()> {
    let defaults = JobDefaults::from_settings(settings);
    let mut records = Vec::new();

    // --- 1. Build one job per symbol ---
    let mut jobs = Vec::new();
    if symbols.is_empty() {
        let watchlist = app_config::load_watchlist(watchlist)
            .context("Failed to load watchlist")?;
        for entry in watchlist.enabled() {
            match TradeJob::from_entry(entry, &defaults) {
                Ok(mut job) => {
                    trade.apply(&mut job);
                    jobs.push(job);
                }
                Err(e) => {
                    tracing::error!(symbol = %entry.symbol, error = %format!("{:#}", e), "Skipping watchlist entry.");
                    let mut job = TradeJob::new(Symbol::new(&entry.symbol), &defaults);
                    trade.apply(&mut job);
                    records.push(SignalRecord::failure(Utc::now(), &job, &e));
                }
            }
        }
    } else {
        for symbol in symbols.iter().filter(|s| !s.trim().is_empty()) {
            let mut job = TradeJob::new(Symbol::new(symbol), &defaults);
            trade.apply(&mut job);
            jobs.push(job);
        }
    }

    let requested = jobs.len() + records.len();
    if requested == 0 {
        anyhow::bail!("No symbols to scan. Pass --symbols or enable entries in the watchlist.");
    }

    // --- 2. Run them concurrently ---
    let engine = build_engine(settings, &trade)?;
    let entries = engine.scan(jobs).await;

    // --- 3. Report ---
    let now = Utc::now();
    for ScanEntry { job, outcome } in &entries {
        match outcome {
            Ok(outcome) => {
                println!("{}: signal {} ({}) {}", job.symbol, outcome.signal, outcome.signal.label(), outcome.message());
                records.push(SignalRecord::success(now, job, outcome));
            }
            Err(e) => {
                println!("{}: error: {:#}", job.symbol, e);
                records.push(SignalRecord::failure(now, job, e));
            }
        }
    }
    if let Some(path) = report_path(settings, &trade) {
        report::append_records(&path, &records)?;
    }

    let succeeded = entries.iter().filter(|e| e.outcome.is_ok()).count();
    if succeeded == 0 {
        anyhow::bail!("All {} symbols failed.", requested);
    }
    Ok(())
}

// --- "Bands" Subcommand Logic ---

fn handle_bands(settings: &Settings, file: &Path, band: &BandArgs, output: Option<&Path>) -> Result<()> {
    let mut bands = settings.strategy;
    band.apply(&mut bands);

    let table = api_client::read_price_csv(file)
        .with_context(|| format!("Failed to read price file {}", file.display()))?;
    let rows = HighLowBands::new(bands)?.bands(&table)?;
    tracing::info!(rows = rows.len(), method = %bands.method, periods = bands.periods, "Computed bands.");

    match output {
        Some(path) => {
            let out = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            report::write_bands(out, &rows)?;
        }
        None => report::write_bands(std::io::stdout().lock(), &rows)?,
    }
    Ok(())
}
