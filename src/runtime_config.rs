//! # Runtime Configuration Module
//!
//! Environment-driven settings read at startup.
//!
//! ## Environment Variables
//!
//! ### `ROSTER_STACK_SIZE`
//!
//! Stack size for handler coroutines. Accepts decimal (`32768`) or
//! hexadecimal (`0x8000`). Default: `0x8000` (32 KB).
//!
//! ### `ROSTER_ENV`
//!
//! `test` selects test mode: the binary builds the service but does not open a
//! network listener, so the service can be driven in-process through
//! [`AppService::handle`](crate::server::AppService::handle).

use std::env;

/// Default coroutine stack size (32 KB).
pub const DEFAULT_STACK_SIZE: usize = 0x8000;

pub const STACK_SIZE_ENV: &str = "ROSTER_STACK_SIZE";
pub const ENV_MODE_ENV: &str = "ROSTER_ENV";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Whether `ROSTER_ENV=test` suppresses the network listener
    pub test_mode: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            test_mode: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            env::var(STACK_SIZE_ENV).ok().as_deref(),
            env::var(ENV_MODE_ENV).ok().as_deref(),
        )
    }

    /// Build from raw variable values; unset or unparsable values fall back
    /// to the defaults.
    #[must_use]
    pub fn from_values(stack_size: Option<&str>, env_mode: Option<&str>) -> Self {
        Self {
            stack_size: stack_size.and_then(parse_size).unwrap_or(DEFAULT_STACK_SIZE),
            test_mode: env_mode.is_some_and(|v| v.trim().eq_ignore_ascii_case("test")),
        }
    }

    /// Apply the stack size to the `may` runtime.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

fn parse_size(value: &str) -> Option<usize> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
