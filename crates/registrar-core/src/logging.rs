//! Subscriber installation for processes embedding the registrar.
//! The pipeline itself only emits `tracing` events.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::RegistrarConfig;
use crate::error::{RegistrarError, Result};

/// Installs the global fmt subscriber from the `log_*` settings.
///
/// `RUST_LOG` directives are layered over `log_level`. Fails with
/// [`RegistrarError::Config`] if a subscriber is already installed.
pub fn setup_logging(config: &RegistrarConfig) -> Result<()> {
    let level = parse_log_level(&config.log_level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = fmt::Subscriber::builder().with_env_filter(filter);
    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| RegistrarError::Config(format!("cannot install logger: {}", e)))
}

pub(crate) fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level)
        .map_err(|_| RegistrarError::Config(format!("invalid log_level '{}'", level)))
}
