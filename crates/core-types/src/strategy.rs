// In crates/core-types/src/strategy.rs

use serde::Deserialize;
use serde::de::DeserializeOwned;
use toml::Value;

/// A named strategy with its raw parameter table, as written in TOML:
///
/// ```toml
/// [strategy]
/// name = "high_low_bands"
/// params = { method = "exponential", periods = 10, offset = 1.5 }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub name: String,
    // Holds the `params = { ... }` table; missing means "use defaults".
    #[serde(default = "empty_table")]
    pub params: Value,
}

impl StrategyConfig {
    pub fn new(name: impl Into<String>, params: Value) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Deserializes the parameter table into a concrete settings type.
    pub fn params_as<T: DeserializeOwned>(&self) -> Result<T, toml::de::Error> {
        self.params.clone().try_into()
    }
}

fn empty_table() -> Value {
    Value::Table(Default::default())
}
