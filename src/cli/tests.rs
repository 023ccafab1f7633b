//! Unit tests for CLI parsing

use crate::cli::{run_service, Cli, Commands};
use crate::config::ServiceConfig;
use crate::runtime_config::RuntimeConfig;
use clap::Parser;
use std::net::TcpListener;
use std::path::PathBuf;

#[test]
fn test_no_subcommand_defaults_to_serve() {
    let cli = Cli::try_parse_from(["devops-roster"]).unwrap();
    assert_eq!(
        cli.command(),
        Commands::Serve {
            config: None,
            addr: None
        }
    );
}

#[test]
fn test_serve_with_flags() {
    let cli = Cli::try_parse_from([
        "devops-roster",
        "serve",
        "--config",
        "config/config.yaml",
        "--addr",
        "127.0.0.1:4000",
    ])
    .unwrap();

    match cli.command() {
        Commands::Serve { config, addr } => {
            assert_eq!(config, Some(PathBuf::from("config/config.yaml")));
            assert_eq!(addr.as_deref(), Some("127.0.0.1:4000"));
        }
        Commands::Routes => panic!("Expected Serve command"),
    }
}

#[test]
fn test_routes_command() {
    let cli = Cli::try_parse_from(["devops-roster", "routes"]).unwrap();
    assert_eq!(cli.command(), Commands::Routes);
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["devops-roster", "generate"]).is_err());
}

#[test]
fn test_test_mode_builds_service_without_listening() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = ServiceConfig::default();
    config.http.addr = addr.to_string();
    let runtime = RuntimeConfig {
        test_mode: true,
        ..RuntimeConfig::default()
    };

    run_service(&config, runtime, None).unwrap();
    run_service(&config, runtime, Some(addr.to_string())).unwrap();

    // Nothing kept the port.
    TcpListener::bind(addr).unwrap();
}
