// In crates/engine/src/job.rs

use anyhow::{Context, Result};
use app_config::{Settings, WatchlistEntry};
use core_types::Symbol;
use rust_decimal::Decimal;
use strategies::{HighLowBandSettings, create_strategy};

/// Fallback values for every job of a run: configuration, with any
/// command-line flags applied on top by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDefaults {
    pub interval: String,
    pub lookback: String,
    pub quantity: Decimal,
    pub bands: HighLowBandSettings,
}

impl JobDefaults {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interval: settings.trade.interval.clone(),
            lookback: settings.trade.lookback.clone(),
            quantity: settings.trade.quantity,
            bands: settings.strategy,
        }
    }
}

/// Everything needed to evaluate and route one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeJob {
    pub symbol: Symbol,
    pub interval: String,
    pub lookback: String,
    pub quantity: Decimal,
    pub bands: HighLowBandSettings,
}

impl TradeJob {
    pub fn new(symbol: Symbol, defaults: &JobDefaults) -> Self {
        Self {
            symbol,
            interval: defaults.interval.clone(),
            lookback: defaults.lookback.clone(),
            quantity: defaults.quantity,
            bands: defaults.bands,
        }
    }

    /// Builds a job from a watchlist entry. Values the entry sets win over
    /// `defaults`; a `[symbols.strategy]` block replaces the band settings.
    pub fn from_entry(entry: &WatchlistEntry, defaults: &JobDefaults) -> Result<Self> {
        let mut job = Self::new(Symbol::new(&entry.symbol), defaults);
        if let Some(interval) = &entry.interval {
            job.interval = interval.clone();
        }
        if let Some(lookback) = &entry.lookback {
            job.lookback = lookback.clone();
        }
        if let Some(quantity) = entry.quantity {
            job.quantity = quantity;
        }
        if let Some(config) = &entry.strategy {
            let strategy = create_strategy(config)
                .with_context(|| format!("Bad strategy override for {}", job.symbol))?;
            job.bands = *strategy.settings();
        }
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{AveragingMethod, StrategyConfig};
    use rust_decimal_macros::dec;

    fn defaults() -> JobDefaults {
        JobDefaults::from_settings(&Settings::default())
    }

    fn entry(symbol: &str) -> WatchlistEntry {
        WatchlistEntry {
            symbol: symbol.to_string(),
            enabled: true,
            interval: None,
            lookback: None,
            quantity: None,
            strategy: None,
        }
    }

    #[test]
    fn defaults_come_from_settings() {
        let d = defaults();
        assert_eq!(d.interval, "1d");
        assert_eq!(d.lookback, "60d");
        assert_eq!(d.quantity, dec!(100));
        assert_eq!(d.bands, HighLowBandSettings::default());
    }

    #[test]
    fn entry_overrides_win() {
        let mut e = entry("msft");
        e.interval = Some("1h".to_string());
        e.quantity = Some(dec!(5));

        let job = TradeJob::from_entry(&e, &defaults()).unwrap();
        assert_eq!(job.symbol.as_str(), "MSFT");
        assert_eq!(job.interval, "1h");
        assert_eq!(job.lookback, "60d");
        assert_eq!(job.quantity, dec!(5));
    }

    #[test]
    fn strategy_block_replaces_band_settings() {
        let params: toml::Table = "method = \"triangular\"\nperiods = 10".parse().unwrap();
        let mut e = entry("AAPL");
        e.strategy = Some(StrategyConfig::new("high_low_bands", toml::Value::Table(params)));

        let job = TradeJob::from_entry(&e, &defaults()).unwrap();
        assert_eq!(job.bands.method, AveragingMethod::Triangular);
        assert_eq!(job.bands.periods, 10);
        assert_eq!(job.bands.offset, 2.0);
    }

    #[test]
    fn unknown_strategy_override_is_an_error() {
        let mut e = entry("AAPL");
        e.strategy = Some(StrategyConfig::new("supertrend", toml::Value::Table(Default::default())));
        assert!(TradeJob::from_entry(&e, &defaults()).is_err());
    }
}
