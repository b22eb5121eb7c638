use std::fmt;

use log::trace;
use massive_geometry::{Point, Vector};

use crate::{Recognizer, ScaleListener, TouchFrame};

#[derive(Copy, Clone, Debug)]
pub struct ScaleConfig {
    /// Change of the average span in px before scaling begins.
    pub span_slop: f64,
}

/// Pinch scaling, requires at least two pointers.
///
/// The span is the average distance of the pointers from the pivot, measured per axis and
/// combined.
#[derive(Debug)]
pub struct ScaleRecognizer {
    config: ScaleConfig,
    in_progress: bool,
    pivot: Point,
    last_pivot: Point,
    span: Span,
    last_span: Span,
}

#[derive(Copy, Clone, Default, Debug)]
struct Span {
    /// Average absolute distance from the pivot per axis.
    components: Vector,
    /// Length of `components`.
    radius: f64,
}

impl Span {
    fn of(frame: &TouchFrame) -> Self {
        let pivot = frame.pivot();
        let sum = frame
            .active_pointers()
            .fold(Vector::default(), |sum, pointer| sum + (pointer.pos - pivot).abs());
        let components = sum / frame.effective_pointer_count() as f64;
        Self {
            components,
            radius: components.length(),
        }
    }
}

impl ScaleRecognizer {
    pub fn new(config: ScaleConfig) -> Self {
        Self {
            config,
            in_progress: false,
            pivot: Point::default(),
            last_pivot: Point::default(),
            span: Span::default(),
            last_span: Span::default(),
        }
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Ratio between the current and the last accepted span.
    pub fn scale_factor(&self) -> f64 {
        if self.last_span.radius > 0.0 {
            self.span.radius / self.last_span.radius
        } else {
            1.0
        }
    }

    /// The point to scale around, midpoint of the current and the last accepted pivot.
    pub fn pivot(&self) -> Point {
        self.last_pivot.midpoint(self.pivot)
    }

    /// The current average span.
    pub fn span(&self) -> f64 {
        self.span.radius
    }

    /// The current average span per axis.
    pub fn span_vector(&self) -> Vector {
        self.span.components
    }

    fn accept(&mut self) {
        self.last_pivot = self.pivot;
        self.last_span = self.span;
    }
}

impl<L: ScaleListener + ?Sized> Recognizer<L> for ScaleRecognizer {
    fn on_frame(&mut self, frame: &TouchFrame, listener: &mut L) -> bool {
        if frame.stream_completed() {
            self.in_progress = false;
            return false;
        }

        if frame.pointer_count() < 2 || frame.effective_pointer_count() == 0 {
            return false;
        }

        if frame.config_changed() {
            self.in_progress = false;
            self.pivot = frame.pivot();
            self.span = Span::of(frame);
            self.accept();
            return false;
        }

        if !frame.is_move() {
            return false;
        }

        self.pivot = frame.pivot();
        self.span = Span::of(frame);

        if !self.in_progress {
            if (self.span.radius - self.last_span.radius).abs() >= self.config.span_slop {
                trace!("Scale started at span {}", self.span.radius);
                self.in_progress = true;
                self.accept();
            }
            return false;
        }

        trace!("Scale: {self}");
        if !listener.on_scale(self) {
            return false;
        }
        self.accept();
        true
    }

    fn end_stream(&mut self) {
        self.in_progress = false;
    }
}

impl fmt::Display for ScaleRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scale factor: {}", self.scale_factor())
    }
}
