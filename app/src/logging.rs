// In app/src/logging.rs

use anyhow::{Context, Result};
use app_config::{AppSettings, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `app.log_level`. Logs go to stderr so that CSV
/// written to stdout stays clean.
pub fn init(settings: &AppSettings) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level)
            .with_context(|| format!("Invalid app.log_level '{}'", settings.log_level))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match settings.log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
