//! Service configuration file.
//!
//! Optional YAML file, every field defaulted:
//!
//! ```yaml
//! http:
//!   addr: 0.0.0.0:3000
//! log:
//!   level: info
//!   format: json
//! ```
//!
//! Logging environment variables (`ROSTER_LOG_*`) take precedence over the
//! `log` section.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Address the binary listens on unless overridden.
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub http: HttpConfig,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Listen address, `host:port`
    pub addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

/// `log` section; unset fields defer to the environment or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl ServiceConfig {
    /// Load from `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid configuration YAML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse YAML text; an empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
