// In crates/app-config/src/types.rs

use core_types::StrategyConfig;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use strategies::types::HighLowBandSettings;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Where price history comes from.
    #[serde(default)]
    pub market_data: MarketDataSettings,
    /// The brokerage gateway used for live orders.
    #[serde(default)]
    pub broker: BrokerSettings,
    /// Default band parameters, overridable per symbol and on the command line.
    #[serde(default)]
    pub strategy: HighLowBandSettings,
    #[serde(default)]
    pub trade: TradeSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Default log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Orders reach the broker only when this is set and `--dry-run` is not given.
    #[serde(default)]
    pub live_trading_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            live_trading_enabled: false,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    /// Base URL of the Yahoo Finance chart API.
    #[serde(default = "default_market_data_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// When set, prices are read from `{data_dir}/{SYMBOL}.csv` instead of the network.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: default_market_data_url(),
            timeout_secs: default_timeout_secs(),
            data_dir: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BrokerSettings {
    /// Base URL of the Client Portal gateway, including the `/v1/api` prefix.
    #[serde(default = "default_broker_url")]
    pub base_url: String,
    /// The brokerage account orders are placed in.
    #[serde(default)]
    pub account_id: Option<String>,
    /// The local gateway serves a self-signed certificate.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many order-confirmation prompts are answered before giving up.
    #[serde(default = "default_max_confirmations")]
    pub max_confirmations: u32,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            base_url: default_broker_url(),
            account_id: None,
            accept_invalid_certs: true,
            timeout_secs: default_timeout_secs(),
            max_confirmations: default_max_confirmations(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TradeSettings {
    /// Shares per order.
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
    /// Bar size, e.g. "1d" or "1h".
    #[serde(default = "default_interval")]
    pub interval: String,
    /// History window, e.g. "60d".
    #[serde(default = "default_lookback")]
    pub lookback: String,
}

impl Default for TradeSettings {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            interval: default_interval(),
            lookback: default_lookback(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ReportSettings {
    /// CSV file that signal records are appended to.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// --- Structs for watchlist.toml ---

/// The symbols a `scan` run works through.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Watchlist {
    #[serde(default, rename = "symbols")]
    pub entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    pub fn enabled(&self) -> impl Iterator<Item = &WatchlistEntry> {
        self.entries.iter().filter(|e| e.enabled)
    }
}

/// One symbol in the watchlist, with optional per-symbol overrides.
#[derive(Deserialize, Debug, Clone)]
pub struct WatchlistEntry {
    pub symbol: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub interval: Option<String>,
    pub lookback: Option<String>,
    pub quantity: Option<Decimal>,
    /// Replaces the default band parameters for this symbol.
    pub strategy: Option<StrategyConfig>,
}

/// Helper functions for serde defaults
fn default_environment() -> String {
    "development".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_market_data_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}
fn default_broker_url() -> String {
    "https://localhost:5000/v1/api".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_confirmations() -> u32 {
    5
}
fn default_quantity() -> Decimal {
    Decimal::from(100)
}
fn default_interval() -> String {
    "1d".to_string()
}
fn default_lookback() -> String {
    "60d".to_string()
}
fn default_true() -> bool {
    true
}
