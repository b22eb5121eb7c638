use std::fmt;

use log::trace;
use massive_geometry::{Point, Vector};

use crate::{DragListener, Recognizer, TouchFrame};

#[derive(Copy, Clone, Debug)]
pub struct DragConfig {
    /// Squared distance the pivot must move before a drag begins.
    pub slop_square: f64,
}

/// Drag of the pivot, with any number of pointers.
///
/// Crossing the slop only starts the drag, it is not reported. Every following move is reported
/// relative to the last accepted pivot.
#[derive(Debug)]
pub struct DragRecognizer {
    config: DragConfig,
    in_progress: bool,
    pivot: Point,
    last_pivot: Point,
}

impl DragRecognizer {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            in_progress: false,
            pivot: Point::default(),
            last_pivot: Point::default(),
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Movement since the last accepted pivot.
    pub fn delta(&self) -> Vector {
        self.pivot - self.last_pivot
    }

    pub fn distance(&self) -> f64 {
        self.delta().length()
    }

    /// The current pivot.
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    fn accept(&mut self) {
        self.last_pivot = self.pivot;
    }
}

impl<L: DragListener + ?Sized> Recognizer<L> for DragRecognizer {
    fn on_frame(&mut self, frame: &TouchFrame, listener: &mut L) -> bool {
        if frame.config_changed() {
            self.in_progress = false;
            self.pivot = frame.pivot();
            self.last_pivot = self.pivot;
            return false;
        }

        if frame.stream_completed() {
            self.in_progress = false;
            return false;
        }

        if !frame.is_move() {
            return false;
        }

        self.pivot = frame.pivot();

        if !self.in_progress {
            if self.delta().squared_length() >= self.config.slop_square {
                trace!("Drag started at {:?}", self.pivot);
                self.in_progress = true;
                self.accept();
            }
            return false;
        }

        trace!("Drag: {self}");
        if !listener.on_drag(self) {
            return false;
        }
        self.accept();
        true
    }

    fn end_stream(&mut self) {
        self.in_progress = false;
    }
}

impl fmt::Display for DragRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delta = self.delta();
        write!(f, "dx: {}, dy: {}", delta.x, delta.y)
    }
}
