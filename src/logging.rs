//! Structured logging setup.
//!
//! `tracing` events are rendered by a `tracing-subscriber` fmt layer, JSON for
//! production and pretty-printed for development. `RUST_LOG` overrides the
//! configured level when set.
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `ROSTER_LOG_LEVEL` | trace/debug/info/warn/error | `info` |
//! | `ROSTER_LOG_FORMAT` | json/pretty | `json` |
//! | `ROSTER_LOG_ASYNC` | true/false | `true` |

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LogSettings;

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Write through a non-blocking background worker
    pub async_logging: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            async_logging: true,
        }
    }
}

impl LogConfig {
    /// Environment first, then the config file's `log` section, then defaults.
    #[must_use]
    pub fn resolve(file: &LogSettings) -> Self {
        Self::from_sources(
            env::var("ROSTER_LOG_LEVEL").ok(),
            env::var("ROSTER_LOG_FORMAT").ok(),
            env::var("ROSTER_LOG_ASYNC").ok(),
            file,
        )
    }

    fn from_sources(
        level: Option<String>,
        format: Option<String>,
        async_logging: Option<String>,
        file: &LogSettings,
    ) -> Self {
        let defaults = Self::default();
        Self {
            log_level: level
                .or_else(|| file.level.clone())
                .unwrap_or(defaults.log_level),
            format: format
                .or_else(|| file.format.clone())
                .map_or(defaults.format, |f| LogFormat::parse(&f)),
            async_logging: async_logging
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.async_logging),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Install the global subscriber.
///
/// With async logging the returned guard owns the background writer; keep it
/// alive until exit so buffered lines are flushed when it drops.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level().as_str()));
    // Connection-level chatter from the HTTP server is only interesting when it fails.
    if let Ok(directive) = "may_minihttp=warn".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    let (writer, guard) = if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(non_blocking), Some(guard))
    } else {
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stdout), None)
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_beats_file() {
        let file = LogSettings {
            level: Some("debug".into()),
            format: Some("pretty".into()),
        };
        let cfg = LogConfig::from_sources(Some("warn".into()), None, Some("false".into()), &file);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.format, LogFormat::Pretty);
        assert!(!cfg.async_logging);
    }

    #[test]
    fn test_defaults() {
        let cfg = LogConfig::from_sources(None, None, None, &LogSettings::default());
        assert_eq!(cfg, LogConfig::default());
        assert_eq!(cfg.level(), Level::INFO);
    }

    // The only test in this binary that installs the global subscriber.
    #[test]
    fn test_async_logging_hands_back_writer_guard() {
        let cfg = LogConfig {
            async_logging: true,
            ..LogConfig::default()
        };
        let guard = init_logging_with_config(&cfg).unwrap();
        assert!(guard.is_some());
        tracing::info!("flushed when the guard drops");
        drop(guard);
    }

    #[test]
    fn test_unknown_format_falls_back_to_json() {
        assert_eq!(LogFormat::parse("xml"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Pretty "), LogFormat::Pretty);
    }
}
