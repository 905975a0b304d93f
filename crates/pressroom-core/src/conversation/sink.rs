//! Output sink for streamed model turns.

use pressroom_types::conference::TurnResult;

/// Receives a model turn as it streams in.
///
/// `fragment` is called once per non-empty fragment, in arrival order, as
/// soon as the fragment is decoded. The hooks around it let a terminal sink
/// manage spinners and line breaks; they default to no-ops.
pub trait TurnSink {
    /// A request for the next model turn is about to be sent.
    fn turn_started(&mut self) {}

    /// One text fragment arrived.
    fn fragment(&mut self, text: &str);

    /// The response stream ended normally.
    fn turn_finished(&mut self, _result: &TurnResult) {}
}

impl<T: TurnSink + ?Sized> TurnSink for &mut T {
    fn turn_started(&mut self) {
        (**self).turn_started();
    }

    fn fragment(&mut self, text: &str) {
        (**self).fragment(text);
    }

    fn turn_finished(&mut self, result: &TurnResult) {
        (**self).turn_finished(result);
    }
}

/// Collects fragments into a vector (useful for tests and transcripts).
impl TurnSink for Vec<String> {
    fn fragment(&mut self, text: &str) {
        self.push(text.to_string());
    }
}
