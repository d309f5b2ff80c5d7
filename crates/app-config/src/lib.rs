// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{
    AppSettings, BrokerSettings, LogFormat, MarketDataSettings, ReportSettings, Settings,
    TradeSettings, Watchlist, WatchlistEntry,
};

pub const CONFIG_DIR: &str = "config";
pub const WATCHLIST_FILE: &str = "config/watchlist.toml";

/// Loads the application settings from the `config/` directory.
///
/// Sources are layered, later ones winning:
/// 1. `config/base.toml`, if present.
/// 2. The environment-specific file (e.g., `config/development.toml`), if present.
/// 3. Environment variables (e.g., `APP_BROKER__ACCOUNT_ID=...`).
///
/// Every field has a default, so no file is required.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new(CONFIG_DIR), &environment)
}

/// [`load_settings`] with an explicit directory and environment name.
pub fn load_settings_from(dir: &Path, environment: &str) -> Result<Settings> {
    let load_error = |source: config::ConfigError| Error::LoadError {
        dir: dir.to_path_buf(),
        source,
    };

    let settings = Config::builder()
        .add_source(File::with_name(&dir.join("base").to_string_lossy()).required(false))
        .add_source(File::with_name(&dir.join(environment).to_string_lossy()).required(false))
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(load_error)?;

    let settings: Settings = settings.try_deserialize().map_err(load_error)?;
    Ok(settings)
}

/// Loads the watchlist of symbols to scan.
pub fn load_watchlist(path: &Path) -> Result<Watchlist> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    let watchlist: Watchlist = toml::from_str(&content).map_err(|source| Error::TomlError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(watchlist)
}
