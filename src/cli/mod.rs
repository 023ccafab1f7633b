//! # CLI Module
//!
//! Command line for the `devops-roster` binary.
//!
//! ## Commands
//!
//! ### `serve` (default)
//!
//! ```bash
//! devops-roster serve --config config/config.yaml --addr 127.0.0.1:3000
//! ```
//!
//! - `--config <FILE>` - YAML service configuration (also `ROSTER_CONFIG`)
//! - `--addr <ADDR>` - listen address, overrides `http.addr`
//!
//! With `ROSTER_ENV=test` the service is built but no listener is opened.
//!
//! ### `routes`
//!
//! Print the route table and exit.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, run_service, Cli, Commands};
