//! Terminal sink for streamed model turns.
//!
//! Fragments are written raw and flushed one by one so the reporter's
//! question appears as it is generated. A spinner covers the wait for the
//! first fragment.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use pressroom_core::conversation::sink::TurnSink;
use pressroom_types::conference::TurnResult;

/// Writes model turns to a terminal (or any writer).
pub struct TerminalSink<W: Write = Stdout> {
    out: W,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            spinner: None,
            show_spinner: true,
        }
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink over an arbitrary writer, without a spinner.
    #[cfg(test)]
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            spinner: None,
            show_spinner: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clear the spinner after a failed turn.
    pub fn abort(&mut self) {
        self.clear_spinner();
        let _ = self.out.flush();
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn start_spinner(&mut self) {
        if !self.show_spinner {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("the reporter is thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }
}

impl<W: Write> TurnSink for TerminalSink<W> {
    fn turn_started(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
        self.start_spinner();
    }

    fn fragment(&mut self, text: &str) {
        self.clear_spinner();
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn turn_finished(&mut self, result: &TurnResult) {
        self.clear_spinner();
        let _ = writeln!(self.out);
        if let Some(notice) = abnormal_notice(result) {
            let _ = writeln!(self.out, "  {} {}", style("!").yellow().bold(), style(notice).dim());
        }
        let _ = self.out.flush();
    }
}

/// Notice for a turn that ended without a normal stop, if any.
pub fn abnormal_notice(result: &TurnResult) -> Option<String> {
    if !result.is_abnormal() && !result.is_empty() {
        return None;
    }
    let notice = match (&result.block_reason, &result.finish_reason) {
        (Some(block), _) => format!("The model declined to answer (blocked: {block})."),
        (None, Some(finish)) if !finish.eq_ignore_ascii_case("STOP") && result.is_empty() => {
            format!("The model returned no text (finish reason: {finish}).")
        }
        (None, Some(finish)) if !finish.eq_ignore_ascii_case("STOP") => {
            format!("The model stopped early (finish reason: {finish}).")
        }
        _ => "The model returned no text.".to_string(),
    };
    Some(notice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(sink: TerminalSink<Vec<u8>>) -> String {
        console::strip_ansi_codes(&String::from_utf8(sink.into_inner()).unwrap()).into_owned()
    }

    #[test]
    fn test_fragments_written_in_order() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.turn_started();
        sink.fragment("Hel");
        sink.fragment("lo");
        sink.turn_finished(&TurnResult {
            text: "Hello".into(),
            fragments: 2,
            finish_reason: Some("STOP".into()),
            block_reason: None,
        });
        assert_eq!(rendered(sink), "\nHello\n");
    }

    #[test]
    fn test_blocked_turn_prints_notice() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.turn_started();
        sink.turn_finished(&TurnResult {
            block_reason: Some("SAFETY".into()),
            ..Default::default()
        });
        let out = rendered(sink);
        assert!(out.contains("blocked: SAFETY"), "{out}");
    }

    #[test]
    fn test_notice_variants() {
        let normal = TurnResult {
            text: "Q?".into(),
            fragments: 1,
            finish_reason: Some("STOP".into()),
            block_reason: None,
        };
        assert!(abnormal_notice(&normal).is_none());

        let truncated = TurnResult {
            finish_reason: Some("MAX_TOKENS".into()),
            ..normal.clone()
        };
        assert_eq!(
            abnormal_notice(&truncated).as_deref(),
            Some("The model stopped early (finish reason: MAX_TOKENS).")
        );

        let empty = TurnResult::default();
        assert_eq!(abnormal_notice(&empty).as_deref(), Some("The model returned no text."));
    }

    #[test]
    fn test_abort_without_turn_is_harmless() {
        let mut sink = TerminalSink::with_writer(Vec::new());
        sink.abort();
        assert!(rendered(sink).is_empty());
    }
}
