//! Shared helpers for unit tests.
use std::time::{Duration, Instant};

use massive_geometry::{Point, Vector};

use crate::{
    ActionKind, DoubleTapListener, DoubleTapRecognizer, DragListener, DragRecognizer, FlyListener,
    FlyRecognizer, MotionEvent, Pointer, RotateListener, RotateRecognizer, ScaleListener,
    ScaleRecognizer, TapListener, TapRecognizer, TouchFrame,
};

pub fn event(
    origin: Instant,
    ms: u64,
    action: ActionKind,
    action_index: usize,
    pointers: &[(u64, f64, f64)],
) -> MotionEvent {
    let pointers = pointers
        .iter()
        .map(|&(id, x, y)| Pointer::new(id, Point::new(x, y)))
        .collect();
    MotionEvent::new(action, pointers, origin + Duration::from_millis(ms))
        .with_action_index(action_index)
}

/// Reduces a frame from `(id, x, y)` triples at `ms` after `origin`.
pub fn frame(
    origin: Instant,
    ms: u64,
    action: ActionKind,
    action_index: usize,
    pointers: &[(u64, f64, f64)],
) -> TouchFrame {
    TouchFrame::reduce(
        &event(origin, ms, action, action_index, pointers),
        Point::default(),
    )
}

/// Records every reported gesture and answers all of them with `accept`.
#[derive(Debug, Default)]
pub struct Recorder {
    pub accept: bool,
    pub taps: Vec<Point>,
    pub double_taps: Vec<(Vector, Duration)>,
    pub drags: Vec<Vector>,
    pub flies: Vec<Vector>,
    pub scales: Vec<f64>,
    pub rotations: Vec<f64>,
}

impl Recorder {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            ..Default::default()
        }
    }

    pub fn rejecting() -> Self {
        Self::default()
    }
}

impl TapListener for Recorder {
    fn on_tap(&mut self, tap: &TapRecognizer) -> bool {
        self.taps.push(tap.pos());
        self.accept
    }
}

impl DoubleTapListener for Recorder {
    fn on_double_tap(&mut self, double_tap: &DoubleTapRecognizer) -> bool {
        self.double_taps
            .push((double_tap.delta(), double_tap.elapsed()));
        self.accept
    }
}

impl DragListener for Recorder {
    fn on_drag(&mut self, drag: &DragRecognizer) -> bool {
        self.drags.push(drag.delta());
        self.accept
    }
}

impl FlyListener for Recorder {
    fn on_fly(&mut self, fly: &FlyRecognizer) -> bool {
        self.flies.push(fly.velocity());
        self.accept
    }
}

impl ScaleListener for Recorder {
    fn on_scale(&mut self, scale: &ScaleRecognizer) -> bool {
        self.scales.push(scale.scale_factor());
        self.accept
    }
}

impl RotateListener for Recorder {
    fn on_rotate(&mut self, rotate: &RotateRecognizer) -> bool {
        self.rotations.push(rotate.rotation());
        self.accept
    }
}
