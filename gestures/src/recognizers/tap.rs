use std::fmt;

use log::trace;
use massive_geometry::Point;

use crate::{Recognizer, TapListener, TouchFrame};

#[derive(Copy, Clone, Debug)]
pub struct TapConfig {
    /// Maximum squared distance between down and up position.
    pub slop_square: f64,
}

/// A tap (a click with one or more pointers).
///
/// Detected when the stream ends, so the user can cancel a tap by moving beyond the slop before
/// releasing.
#[derive(Debug)]
pub struct TapRecognizer {
    config: TapConfig,
    pivot: Point,
    last_pivot: Point,
}

impl TapRecognizer {
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            pivot: Point::default(),
            last_pivot: Point::default(),
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Where the tap happened, the midpoint between the down and the up position.
    pub fn pos(&self) -> Point {
        self.last_pivot.midpoint(self.pivot)
    }

    fn accept(&mut self) {
        self.last_pivot = self.pivot;
    }
}

impl<L: TapListener + ?Sized> Recognizer<L> for TapRecognizer {
    fn on_frame(&mut self, frame: &TouchFrame, listener: &mut L) -> bool {
        if frame.is_down() {
            self.pivot = frame.pivot();
            self.last_pivot = self.pivot;
            return false;
        }

        if !frame.is_up() {
            return false;
        }

        self.pivot = frame.pivot();
        if (self.pivot - self.last_pivot).squared_length() > self.config.slop_square {
            return false;
        }

        trace!("Tap: {self}");
        if !listener.on_tap(self) {
            return false;
        }
        self.accept();
        true
    }
}

impl fmt::Display for TapRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.pos();
        write!(f, "x: {}, y: {}", pos.x, pos.y)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::{
        ActionKind::*,
        testing::{Recorder, frame},
    };

    fn recognizer() -> TapRecognizer {
        TapRecognizer::new(TapConfig { slop_square: 64.0 })
    }

    #[test]
    fn tap_within_slop_fires_once_at_up() {
        let origin = Instant::now();
        let mut tap = recognizer();
        let mut recorder = Recorder::accepting();

        assert!(!tap.on_frame(&frame(origin, 0, Down, 0, &[(0, 100.0, 100.0)]), &mut recorder));
        assert!(!tap.on_frame(&frame(origin, 30, Move, 0, &[(0, 104.0, 100.0)]), &mut recorder));
        assert!(recorder.taps.is_empty());
        assert!(tap.on_frame(&frame(origin, 60, Up, 0, &[(0, 104.0, 104.0)]), &mut recorder));

        assert_eq!(recorder.taps, vec![Point::new(102.0, 102.0)]);
        // Accepted: the reported position collapses to the up position.
        assert_eq!(tap.pos(), Point::new(104.0, 104.0));
    }

    #[test]
    fn tap_beyond_slop_never_fires() {
        let origin = Instant::now();
        let mut tap = recognizer();
        let mut recorder = Recorder::accepting();

        tap.on_frame(&frame(origin, 0, Down, 0, &[(0, 100.0, 100.0)]), &mut recorder);
        assert!(!tap.on_frame(&frame(origin, 60, Up, 0, &[(0, 109.0, 100.0)]), &mut recorder));
        assert!(recorder.taps.is_empty());
    }

    #[test]
    fn rejected_tap_keeps_down_position() {
        let origin = Instant::now();
        let mut tap = recognizer();
        let mut recorder = Recorder::rejecting();

        tap.on_frame(&frame(origin, 0, Down, 0, &[(0, 10.0, 10.0)]), &mut recorder);
        assert!(!tap.on_frame(&frame(origin, 60, Up, 0, &[(0, 14.0, 10.0)]), &mut recorder));
        assert_eq!(recorder.taps.len(), 1);
        assert_eq!(tap.pos(), Point::new(12.0, 10.0));
    }

    #[test]
    fn cancel_does_not_fire() {
        let origin = Instant::now();
        let mut tap = recognizer();
        let mut recorder = Recorder::accepting();

        tap.on_frame(&frame(origin, 0, Down, 0, &[(0, 10.0, 10.0)]), &mut recorder);
        assert!(!tap.on_frame(&frame(origin, 60, Cancel, 0, &[(0, 10.0, 10.0)]), &mut recorder));
        assert!(recorder.taps.is_empty());
    }
}
