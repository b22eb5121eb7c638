use crate::TouchFrame;

/// A gesture state machine driven by frames.
///
/// `L` is the listener capability the recognizer reports to. The set of recognizers a
/// [`GestureDetector`](crate::GestureDetector) drives is fixed.
pub(crate) trait Recognizer<L: ?Sized> {
    /// Processes a frame. Returns `true` if the recognizer fired and the listener accepted.
    fn on_frame(&mut self, frame: &TouchFrame, listener: &mut L) -> bool;

    /// The stream completed while the recognizer was not driven (disabled or skipped).
    ///
    /// Clears all state that must not survive a stream.
    fn end_stream(&mut self) {}
}
