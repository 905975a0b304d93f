//! Human input port and reply classification.

use std::future::Future;

/// Events produced by a human input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The human submitted a line (untrimmed).
    Line(String),
    /// End of input (Ctrl+D, closed stdin).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Source of human replies between model turns.
pub trait HumanInput {
    /// Wait for the next reply.
    fn read_reply(&mut self) -> impl Future<Output = InputEvent>;
}

/// What a submitted line means to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A real answer, kept verbatim.
    Answer(String),
    /// Whitespace only; ask again.
    Blank,
    /// The quit keyword.
    Quit,
}

/// Classify a submitted line.
///
/// The quit keyword matches after trimming, ignoring letter case. Answers are
/// returned exactly as typed.
pub fn classify(line: &str, quit_keyword: &str) -> Reply {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Reply::Blank;
    }
    if !quit_keyword.is_empty() && trimmed.eq_ignore_ascii_case(quit_keyword.trim()) {
        return Reply::Quit;
    }
    Reply::Answer(line.to_string())
}
