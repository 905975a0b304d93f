//! Human input for the conference loop.
//!
//! On a terminal, each answer is read through `rustyline_async::Readline`
//! (line editing, Ctrl+C / Ctrl+D). The readline is created per prompt and
//! dropped after the line is read, so the terminal is back in cooked mode
//! while the next model turn streams. When stdin is not a terminal, lines
//! are read from it directly.

use std::io::{IsTerminal, Write};

use rustyline_async::{Readline, ReadlineError, ReadlineEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use pressroom_core::conversation::input::{HumanInput, InputEvent};

/// Reads answers from the console.
pub enum ConsoleInput {
    Terminal { prompt: String },
    Piped(PipedInput<BufReader<Stdin>>),
}

impl ConsoleInput {
    /// Pick the terminal or piped reader depending on stdin.
    pub fn new(prompt: String) -> Self {
        if std::io::stdin().is_terminal() {
            ConsoleInput::Terminal { prompt }
        } else {
            ConsoleInput::Piped(PipedInput::new(BufReader::new(tokio::io::stdin()), Some(prompt)))
        }
    }
}

impl HumanInput for ConsoleInput {
    async fn read_reply(&mut self) -> InputEvent {
        match self {
            ConsoleInput::Terminal { prompt } => read_terminal_line(prompt).await,
            ConsoleInput::Piped(piped) => piped.read_reply().await,
        }
    }
}

async fn read_terminal_line(prompt: &str) -> InputEvent {
    println!();
    let (mut rl, _writer) = match Readline::new(prompt.to_string()) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(error = %e, "failed to initialize readline, treating as end of input");
            return InputEvent::Eof;
        }
    };
    let event = to_input_event(rl.readline().await);
    let _ = rl.flush();
    event
}

/// Map a readline result onto an input event. Readline errors end input.
fn to_input_event(result: Result<ReadlineEvent, ReadlineError>) -> InputEvent {
    match result {
        Ok(ReadlineEvent::Line(line)) => InputEvent::Line(line),
        Ok(ReadlineEvent::Eof) => InputEvent::Eof,
        Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
        Err(e) => {
            tracing::debug!(error = %e, "readline error");
            InputEvent::Eof
        }
    }
}

/// Line reader over any async buffered source.
pub struct PipedInput<R> {
    lines: Lines<R>,
    prompt: Option<String>,
}

impl<R: AsyncBufRead + Unpin> PipedInput<R> {
    pub fn new(reader: R, prompt: Option<String>) -> Self {
        Self {
            lines: reader.lines(),
            prompt,
        }
    }
}

impl<R: AsyncBufRead + Unpin> HumanInput for PipedInput<R> {
    async fn read_reply(&mut self) -> InputEvent {
        if let Some(prompt) = &self.prompt {
            let mut stdout = std::io::stdout();
            let _ = write!(stdout, "\n{prompt}");
            let _ = stdout.flush();
        }
        match self.lines.next_line().await {
            Ok(Some(line)) => InputEvent::Line(line),
            Ok(None) => InputEvent::Eof,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read from stdin");
                InputEvent::Eof
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readline_events_map_to_input_events() {
        assert_eq!(
            to_input_event(Ok(ReadlineEvent::Line("  Great win. ".into()))),
            InputEvent::Line("  Great win. ".into())
        );
        assert_eq!(to_input_event(Ok(ReadlineEvent::Eof)), InputEvent::Eof);
        assert_eq!(to_input_event(Ok(ReadlineEvent::Interrupted)), InputEvent::Interrupted);
    }

    #[tokio::test]
    async fn test_piped_lines_then_eof() {
        let mut input = PipedInput::new(&b"first answer\r\n\n/quit\n"[..], None);
        assert_eq!(input.read_reply().await, InputEvent::Line("first answer".into()));
        assert_eq!(input.read_reply().await, InputEvent::Line(String::new()));
        assert_eq!(input.read_reply().await, InputEvent::Line("/quit".into()));
        assert_eq!(input.read_reply().await, InputEvent::Eof);
    }

    #[tokio::test]
    async fn test_piped_empty_source_is_eof() {
        let mut input = PipedInput::new(&b""[..], None);
        assert_eq!(input.read_reply().await, InputEvent::Eof);
    }
}
