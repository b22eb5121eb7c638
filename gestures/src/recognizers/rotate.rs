use std::{
    collections::HashMap,
    f64::consts::{PI, TAU},
    fmt,
};

use log::trace;
use massive_geometry::Point;

use crate::{PointerId, Recognizer, RotateListener, TouchFrame};

#[derive(Copy, Clone, Debug)]
pub struct RotateConfig {
    /// Rotation in radians before rotating begins.
    pub rotation_slop: f64,
}

impl RotateConfig {
    /// 10 degrees.
    pub const DEFAULT_ROTATION_SLOP: f64 = PI / 18.0;
}

/// Rotation of the pointers around their pivot, requires at least two pointers.
///
/// Tracks the bearing of every pointer relative to the pivot. The rotation of a frame is the
/// average bearing change of all pointers.
#[derive(Debug)]
pub struct RotateRecognizer {
    config: RotateConfig,
    in_progress: bool,
    /// Radians, counter clockwise positive.
    rotation: f64,
    pivot: Point,
    last_pivot: Point,
    /// The bearing of each pointer at the time of the last accept.
    bearings: HashMap<PointerId, f64>,
}

impl RotateRecognizer {
    pub fn new(config: RotateConfig) -> Self {
        Self {
            config,
            in_progress: false,
            rotation: 0.0,
            pivot: Point::default(),
            last_pivot: Point::default(),
            bearings: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RotateConfig {
        &self.config
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Rotation since the last accept in radians. Positive values rotate counter clockwise on
    /// screen.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The point to rotate around, midpoint of the current and the last accepted pivot.
    pub fn pivot(&self) -> Point {
        self.last_pivot.midpoint(self.pivot)
    }

    fn accept(&mut self, frame: &TouchFrame) {
        self.last_pivot = self.pivot;
        self.snapshot_bearings(frame);
    }

    fn snapshot_bearings(&mut self, frame: &TouchFrame) {
        let pivot = frame.pivot();
        self.bearings.extend(
            frame
                .active_pointers()
                .map(|pointer| (pointer.id, bearing(pivot, pointer.pos))),
        );
    }

    fn measure_rotation(&self, frame: &TouchFrame) -> f64 {
        let pivot = frame.pivot();
        let sum: f64 = frame
            .active_pointers()
            .filter_map(|pointer| {
                let last = self.bearings.get(&pointer.id)?;
                Some(wrap_rotation(bearing(pivot, pointer.pos) - last))
            })
            .sum();
        sum / frame.effective_pointer_count() as f64
    }
}

impl<L: RotateListener + ?Sized> Recognizer<L> for RotateRecognizer {
    fn on_frame(&mut self, frame: &TouchFrame, listener: &mut L) -> bool {
        if frame.stream_completed() {
            // Bearings stay until the next config change.
            self.in_progress = false;
            return false;
        }

        if frame.pointer_count() < 2 || frame.effective_pointer_count() == 0 {
            return false;
        }

        if frame.config_changed() {
            self.bearings.clear();
            self.snapshot_bearings(frame);
            self.in_progress = false;
            self.rotation = 0.0;
            self.pivot = frame.pivot();
            self.last_pivot = self.pivot;
            return false;
        }

        if !frame.is_move() {
            return false;
        }

        self.pivot = frame.pivot();
        self.rotation = self.measure_rotation(frame);

        if !self.in_progress {
            if self.rotation.abs() >= self.config.rotation_slop {
                trace!("Rotate started at {} rad", self.rotation);
                self.in_progress = true;
                self.accept(frame);
            }
            return false;
        }

        trace!("Rotate: {self}");
        if !listener.on_rotate(self) {
            return false;
        }
        self.accept(frame);
        true
    }

    fn end_stream(&mut self) {
        self.in_progress = false;
    }
}

impl fmt::Display for RotateRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pivot = self.pivot();
        write!(
            f,
            "rotation: {}, pivot x: {}, pivot y: {}",
            self.rotation, pivot.x, pivot.y
        )
    }
}

/// Angle of `pos` seen from `pivot`, with y pointing up.
fn bearing(pivot: Point, pos: Point) -> f64 {
    (-(pos.y - pivot.y)).atan2(pos.x - pivot.x)
}

/// Maps a bearing difference that crossed the ±π branch cut back to the short way around.
fn wrap_rotation(rotation: f64) -> f64 {
    if rotation >= PI {
        rotation - TAU
    } else if rotation <= -PI {
        rotation + TAU
    } else {
        rotation
    }
}
