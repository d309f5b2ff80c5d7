//! Builds strategies from `[strategy]` configuration blocks.

use crate::high_low_bands::HighLowBands;
use crate::types::HighLowBandSettings;
use anyhow::{Context, Result};
use core_types::StrategyConfig;

pub const HIGH_LOW_BANDS: &str = "high_low_bands";

/// Builds the strategy named by a configuration block.
///
/// Params missing from the block take their defaults; unknown names,
/// unknown methods and invalid windows are errors.
pub fn create_strategy(config: &StrategyConfig) -> Result<HighLowBands> {
    match config.name.as_str() {
        HIGH_LOW_BANDS => {
            let settings: HighLowBandSettings = config
                .params_as()
                .with_context(|| format!("Invalid params for strategy '{}'", config.name))?;
            Ok(HighLowBands::new(settings)?)
        }
        unknown => anyhow::bail!("Attempted to create unknown strategy: {}", unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Strategy;
    use core_types::{AveragingMethod, Error};

    fn config(toml_src: &str) -> StrategyConfig {
        #[derive(serde::Deserialize)]
        struct Holder {
            strategy: StrategyConfig,
        }
        toml::from_str::<Holder>(toml_src).unwrap().strategy
    }

    #[test]
    fn builds_high_low_bands_from_params() {
        let cfg = config(
            r#"
            [strategy]
            name = "high_low_bands"
            params = { method = "exponential", periods = 5, offset = 1.5 }
            "#,
        );
        let params: HighLowBandSettings = cfg.params_as().unwrap();
        assert_eq!(params.method, AveragingMethod::Exponential);
        assert_eq!(params.periods, 5);

        let strategy = create_strategy(&cfg).unwrap();
        assert_eq!(strategy.name(), "HighLowBands");
        assert_eq!(strategy.settings().offset, 1.5);
    }

    #[test]
    fn missing_params_fall_back_to_defaults() {
        let cfg = config("[strategy]\nname = \"high_low_bands\"\n");
        let params: HighLowBandSettings = cfg.params_as().unwrap();
        assert_eq!(params, HighLowBandSettings::default());
    }

    #[test]
    fn unknown_method_is_an_error_not_a_default() {
        let cfg = config(
            r#"
            [strategy]
            name = "high_low_bands"
            params = { method = "kama" }
            "#,
        );
        assert!(create_strategy(&cfg).is_err());
    }

    #[test]
    fn invalid_periods_surface_the_core_error() {
        let cfg = config(
            r#"
            [strategy]
            name = "high_low_bands"
            params = { periods = 0 }
            "#,
        );
        let err = create_strategy(&cfg).err().unwrap();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InvalidParameter(_))));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let cfg = config("[strategy]\nname = \"supertrend\"\n");
        let err = create_strategy(&cfg).err().unwrap();
        assert!(err.to_string().contains("supertrend"));
    }
}
