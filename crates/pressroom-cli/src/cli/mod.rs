//! CLI command definitions for the `pressroom` binary.

pub mod conference;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Face the press: an interactive, streamed press conference with a model.
#[derive(Parser)]
#[command(name = "pressroom", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs on stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a press conference.
    Run(RunArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Briefing file with the instruction context (`-` reads stdin).
    #[arg(short, long)]
    pub briefing: PathBuf,

    /// First human turn sent to the model.
    #[arg(long)]
    pub opening: Option<String>,

    /// Title shown in the banner.
    #[arg(long, default_value = "Press Conference Simulator")]
    pub title: String,

    /// Model identifier (overrides config.toml).
    #[arg(long)]
    pub model: Option<String>,

    /// Endpoint base URL (overrides config.toml).
    #[arg(long)]
    pub base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "pressroom",
            "-v",
            "run",
            "--briefing",
            "brief.md",
            "--model",
            "gemini-2.5-flash",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.briefing, PathBuf::from("brief.md"));
        assert_eq!(args.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(args.title, "Press Conference Simulator");
        assert!(args.opening.is_none());
    }

    #[test]
    fn test_run_requires_briefing() {
        assert!(Cli::try_parse_from(["pressroom", "run"]).is_err());
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["pressroom", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Bash }));
    }
}
