use crate::app::build_default_service;
use crate::config::ServiceConfig;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::router::Router;
use crate::routes::route_table;
use crate::runtime_config::RuntimeConfig;
use crate::server::{HttpServer, ServerHandle};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Command-line interface for the roster service
#[derive(Debug, Parser)]
#[command(name = "devops-roster")]
#[command(about = "DevOps class roster HTTP service", long_about = None)]
pub struct Cli {
    /// The subcommand to execute; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// YAML configuration file
        #[arg(short, long, env = "ROSTER_CONFIG")]
        config: Option<PathBuf>,

        /// Listen address, overrides `http.addr` from the config file
        #[arg(long)]
        addr: Option<String>,
    },
    /// Print the route table and exit
    Routes,
}

impl Cli {
    /// The selected command, `serve` with no overrides when none was given.
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve {
            config: None,
            addr: None,
        })
    }
}

/// Execute the parsed command line.
///
/// # Errors
///
/// Returns an error if:
/// - The config file cannot be read or parsed
/// - Logging cannot be initialised
/// - The service cannot be built or the address cannot be bound
pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command() {
        Commands::Serve { config, addr } => serve(config, addr),
        Commands::Routes => {
            let router = Router::new(route_table()).context("failed to compile route table")?;
            router.dump_routes();
            Ok(())
        }
    }
}

fn serve(config_path: Option<PathBuf>, addr: Option<String>) -> Result<()> {
    let config = ServiceConfig::load(config_path.as_deref())?;
    // Dropped when `serve` returns, flushing buffered log lines.
    let _log_guard = init_logging_with_config(&LogConfig::resolve(&config.log))?;
    run_service(&config, RuntimeConfig::from_env(), addr)
}

/// Build the service and, outside test mode, serve it until SIGINT/SIGTERM.
///
/// `addr` overrides `config.http.addr`. In test mode the service is built
/// and the function returns without binding.
///
/// # Errors
///
/// Fails if the service cannot be built or the address cannot be bound.
pub fn run_service(
    config: &ServiceConfig,
    runtime: RuntimeConfig,
    addr: Option<String>,
) -> Result<()> {
    runtime.apply();
    info!(
        stack_size = runtime.stack_size,
        test_mode = runtime.test_mode,
        "Runtime configured"
    );

    let service = build_default_service()?;
    if runtime.test_mode {
        info!("Test mode: service built, not listening");
        return Ok(());
    }

    let addr = addr.unwrap_or_else(|| config.http.addr.clone());
    let handle = HttpServer(service)
        .start(addr.as_str())
        .with_context(|| format!("failed to bind {addr}"))?;
    wait_for_shutdown(handle)
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("failed to install signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "Shutdown signal received");
    }
    handle.stop();
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server coroutine panicked: {e:?}"))
}

