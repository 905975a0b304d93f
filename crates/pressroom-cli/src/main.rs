//! Pressroom CLI entry point.
//!
//! Binary name: `pressroom`
//!
//! Parses CLI arguments, sets up tracing, then runs an interactive press
//! conference against a streaming model endpoint.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;

use pressroom_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Shell completions need neither tracing nor config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pressroom", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    if let Err(e) = init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = match cli.command {
        Commands::Run(args) => cli::conference::loop_runner::run_conference(args).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
