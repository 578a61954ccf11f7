//! Registrar configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RegistrarError, Result};
use crate::logging::parse_log_level;
use crate::types::DEFAULT_EXPIRES;

/// Configuration for the registration pipeline.
///
/// ```rust
/// use sipserve_registrar_core::RegistrarConfig;
///
/// let config = RegistrarConfig::from_toml_str(r#"
///     default_expires = 600
///     server_header = "SIPServer/1.0"
/// "#).unwrap();
///
/// assert_eq!(config.default_expires, 600);
/// assert_eq!(config.key_prefix, "user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    /// Binding lifetime when the request names none, in seconds
    pub default_expires: u32,

    /// Upper bound on the binding store call when the caller gives no deadline
    pub store_timeout_ms: u64,

    /// Store keys are `"{key_prefix}:{username}"`
    pub key_prefix: String,

    /// Optional `Server` header value added to every response
    pub server_header: Option<String>,

    /// Default level for [`setup_logging`](crate::logging::setup_logging)
    pub log_level: String,

    /// Emit JSON lines instead of the human-readable format
    pub log_json: bool,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            default_expires: DEFAULT_EXPIRES, // 1 hour
            store_timeout_ms: 2000,
            key_prefix: "user".to_string(),
            server_header: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl RegistrarConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: RegistrarConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RegistrarError::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_expires == 0 {
            return Err(RegistrarError::Config(
                "default_expires must be greater than zero".to_string(),
            ));
        }
        if self.store_timeout_ms == 0 {
            return Err(RegistrarError::Config(
                "store_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.key_prefix.is_empty() || self.key_prefix.contains(':') {
            return Err(RegistrarError::Config(format!(
                "invalid key_prefix '{}'",
                self.key_prefix
            )));
        }
        parse_log_level(&self.log_level)?;
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
