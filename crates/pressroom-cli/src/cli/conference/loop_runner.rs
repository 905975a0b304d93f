//! Conference orchestration for `pressroom run`.
//!
//! Resolves config and credential, loads the briefing, prints the banner,
//! drives the conference to its end and turns the outcome into a closing
//! line and an exit code.

use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use anyhow::Context;
use console::style;
use secrecy::SecretString;
use tracing::Instrument;

use pressroom_core::conversation::driver::{ConferenceDriver, DriverSettings};
use pressroom_core::conversation::session::Session;
use pressroom_core::llm::provider::ModelEndpoint;
use pressroom_infra::briefing::{BriefingSource, load_briefing};
use pressroom_infra::config::{load_conference_config, resolve_data_dir};
use pressroom_infra::llm::create_endpoint;
use pressroom_infra::secret::resolve_with;
use pressroom_observe::genai_attrs::{conference_span, record_outcome};
use pressroom_types::conference::ConferenceOutcome;
use pressroom_types::config::ConferenceConfig;
use pressroom_types::error::ConferenceError;

use super::super::RunArgs;
use super::banner::print_welcome_banner;
use super::input::ConsoleInput;
use super::renderer::TerminalSink;

/// How a run ended, as shown to the human.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Closing {
    Concluded,
    Abandoned,
    Failed(String),
}

impl Closing {
    pub fn from_result(result: &Result<ConferenceOutcome, ConferenceError>) -> Self {
        match result {
            Ok(ConferenceOutcome::Concluded) => Closing::Concluded,
            Ok(ConferenceOutcome::Cancelled(_)) => Closing::Abandoned,
            Err(err) => Closing::Failed(err.to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Closing::Concluded => "concluded",
            Closing::Abandoned => "cancelled",
            Closing::Failed(_) => "failed",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Closing::Failed(_) => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        }
    }

    fn print(&self) {
        match self {
            Closing::Concluded => println!("\n  {}\n", style("Thanks for playing!").bold()),
            Closing::Abandoned => println!("\n  {}\n", style("Press conference abandoned.").dim()),
            Closing::Failed(message) => eprintln!("\n  {} {message}", style("!").red().bold()),
        }
    }
}

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(mut config: ConferenceConfig, args: &RunArgs) -> ConferenceConfig {
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    config
}

/// Resolve the API key from `var`. When it is missing, write how to set it
/// to `out` and hand back the exit code to stop with.
fn require_api_key<F, W>(var: &str, lookup: F, out: &mut W) -> Result<SecretString, ExitCode>
where
    F: FnOnce(&str) -> Option<String>,
    W: Write,
{
    resolve_with(var, lookup).map_err(|err| {
        tracing::debug!(error = %err, "no API key, not starting a session");
        let _ = writeln!(
            out,
            "{}\n  export {var}=your-key-here",
            style(format!("Set {var} environment variable first.")).red()
        );
        ExitCode::FAILURE
    })
}

/// Run one press conference.
pub async fn run_conference(args: RunArgs) -> anyhow::Result<ExitCode> {
    let data_dir = resolve_data_dir();
    let config = apply_overrides(load_conference_config(&data_dir).await, &args);
    run_with_config(
        config,
        args,
        |var| std::env::var(var).ok(),
        std::io::stdin().is_terminal(),
    )
    .await
}

async fn run_with_config<F>(
    config: ConferenceConfig,
    args: RunArgs,
    lookup: F,
    stdin_is_terminal: bool,
) -> anyhow::Result<ExitCode>
where
    F: FnOnce(&str) -> Option<String>,
{
    let api_key = match require_api_key(&config.api_key_env, lookup, &mut std::io::stderr()) {
        Ok(key) => key,
        Err(code) => return Ok(code),
    };

    let source = BriefingSource::from_arg(&args.briefing);
    source.ensure_replies_readable(stdin_is_terminal)?;
    let briefing = load_briefing(&source)
        .await
        .with_context(|| format!("could not load the briefing from {source}"))?;

    let endpoint = create_endpoint(&config, api_key).context("could not set up the model endpoint")?;
    let opening = args.opening.clone().unwrap_or_else(|| config.opening_line.clone());
    let mut session = Session::new(briefing, opening);

    let session_id = session.info().id.to_string();
    print_welcome_banner(&args.title, endpoint.model(), &session.info().short_id(), &config.quit_keyword);

    let span = conference_span(endpoint.name(), endpoint.model(), &session_id);
    let driver = ConferenceDriver::new(endpoint, DriverSettings::from(&config));
    let mut sink = TerminalSink::stdout();
    let mut input = ConsoleInput::new(format!("{} ", style("Your response:").green().bold()));

    let result = driver
        .run(&mut session, &mut sink, &mut input)
        .instrument(span.clone())
        .await;

    if result.is_err() {
        sink.abort();
    }
    let closing = Closing::from_result(&result);
    record_outcome(&span, closing.label());
    tracing::info!(
        session = %session_id,
        outcome = closing.label(),
        turns = session.transcript().len(),
        "conference finished"
    );
    closing.print();
    Ok(closing.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use pressroom_types::conference::CancelReason;

    fn args() -> RunArgs {
        RunArgs {
            briefing: PathBuf::from("brief.md"),
            opening: None,
            title: "t".into(),
            model: None,
            base_url: None,
        }
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let args = RunArgs {
            model: Some("gemini-2.5-pro".into()),
            base_url: Some("http://localhost:9999".into()),
            ..args()
        };
        let config = apply_overrides(ConferenceConfig::default(), &args);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.sentinel, "[END OF PRESS CONFERENCE]");
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = apply_overrides(ConferenceConfig::default(), &args());
        assert_eq!(config, ConferenceConfig::default());
    }

    #[test]
    fn test_missing_key_prints_hint_and_fails() {
        let mut out = Vec::new();
        let code = require_api_key("GEMINI_API_KEY", |_| None, &mut out).unwrap_err();
        assert_eq!(code, ExitCode::FAILURE);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Set GEMINI_API_KEY environment variable first."));
        assert!(text.contains("export GEMINI_API_KEY=your-key-here"));
    }

    #[test]
    fn test_present_key_prints_nothing() {
        let mut out = Vec::new();
        assert!(require_api_key("GEMINI_API_KEY", |_| Some("k".into()), &mut out).is_ok());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_stops_before_briefing_and_endpoint() {
        // The briefing does not exist and the endpoint is unreachable, so
        // getting past the credential check would surface as an error.
        let config = ConferenceConfig {
            base_url: "http://127.0.0.1:1".into(),
            ..ConferenceConfig::default()
        };
        let args = RunArgs {
            briefing: PathBuf::from("/nonexistent/pressroom/brief.md"),
            ..args()
        };
        let code = run_with_config(config, args, |_| None, true).await.unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn test_stdin_briefing_refused_when_stdin_is_piped() {
        let args = RunArgs {
            briefing: PathBuf::from("-"),
            ..args()
        };
        let err = run_with_config(ConferenceConfig::default(), args, |_| Some("k".into()), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a terminal"));
    }

    #[test]
    fn test_closing_for_each_outcome() {
        let concluded = Closing::from_result(&Ok(ConferenceOutcome::Concluded));
        assert_eq!(concluded, Closing::Concluded);
        assert_eq!(concluded.exit_code(), ExitCode::SUCCESS);

        let quit = Closing::from_result(&Ok(ConferenceOutcome::Cancelled(CancelReason::QuitKeyword)));
        assert_eq!(quit, Closing::Abandoned);
        assert_eq!(quit.exit_code(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_http_failure_exits_non_zero_with_status_and_body() {
        let closing = Closing::from_result(&Err(ConferenceError::HttpStatus {
            status: 429,
            body: r#"{"error":"rate limited"}"#.into(),
        }));
        let Closing::Failed(message) = &closing else {
            panic!("expected failure");
        };
        assert!(message.contains("429"));
        assert!(message.contains("rate limited"));
        assert_eq!(closing.exit_code(), ExitCode::FAILURE);
        assert_eq!(closing.label(), "failed");
    }
}
