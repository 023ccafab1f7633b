use clap::Parser;
use devops_roster::cli::{run_cli, Cli};

fn main() -> anyhow::Result<()> {
    run_cli(Cli::parse())
}
