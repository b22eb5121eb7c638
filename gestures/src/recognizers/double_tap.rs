use std::{
    fmt,
    time::{Duration, Instant},
};

use log::trace;
use massive_geometry::{Point, Vector};

use crate::{DoubleTapListener, Recognizer, TouchFrame};

#[derive(Copy, Clone, Debug)]
pub struct DoubleTapConfig {
    /// Maximum time between the two up events.
    pub timeout: Duration,
    /// Maximum squared distance between the two up positions.
    pub slop_square: f64,
}

/// A pivot at the time a stream ended.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TimedPoint {
    pub time: Instant,
    pub pos: Point,
}

/// Double tap, detected at the up event of the second tap.
///
/// The two taps are remembered across streams. After a pair is compared, both slots are cleared
/// whether it fired or not, so a third tap starts a new pair.
///
/// The pair is compared as soon as the second tap fills its slot. It does not wait for a
/// further up event to evaluate a full pair.
#[derive(Debug)]
pub struct DoubleTapRecognizer {
    config: DoubleTapConfig,
    first: Option<TimedPoint>,
    second: Option<TimedPoint>,
}

impl DoubleTapRecognizer {
    pub fn new(config: DoubleTapConfig) -> Self {
        Self {
            config,
            first: None,
            second: None,
        }
    }

    pub fn config(&self) -> &DoubleTapConfig {
        &self.config
    }

    pub fn first(&self) -> Option<TimedPoint> {
        self.first
    }

    pub fn second(&self) -> Option<TimedPoint> {
        self.second
    }

    /// Movement from the first to the second tap.
    pub fn delta(&self) -> Vector {
        match (self.first, self.second) {
            (Some(first), Some(second)) => second.pos - first.pos,
            _ => Vector::default(),
        }
    }

    /// Time between the first and the second tap.
    pub fn elapsed(&self) -> Duration {
        match (self.first, self.second) {
            (Some(first), Some(second)) => second.time.saturating_duration_since(first.time),
            _ => Duration::ZERO,
        }
    }

    fn is_double_tap(&self) -> bool {
        self.elapsed() <= self.config.timeout
            && self.delta().squared_length() <= self.config.slop_square
    }
}

impl<L: DoubleTapListener + ?Sized> Recognizer<L> for DoubleTapRecognizer {
    fn on_frame(&mut self, frame: &TouchFrame, listener: &mut L) -> bool {
        if !frame.is_up() {
            return false;
        }

        let tap = TimedPoint {
            time: frame.time(),
            pos: frame.pivot(),
        };

        if self.first.is_none() {
            self.first = Some(tap);
            return false;
        }
        self.second = Some(tap);

        let mut handled = false;
        if self.is_double_tap() {
            trace!("Double tap: {self}");
            handled = listener.on_double_tap(self);
        }

        self.first = None;
        self.second = None;
        handled
    }
}

impl fmt::Display for DoubleTapRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delta = self.delta();
        write!(
            f,
            "dx: {}, dy: {}, elapsed: {:?}",
            delta.x,
            delta.y,
            self.elapsed()
        )
    }
}
