use std::time::Instant;

use derive_more::Constructor;
use massive_geometry::Point;

use crate::ActionKind;

/// Stable identity of a pointer (finger) for the duration of a stream.
pub type PointerId = u64;

#[derive(Copy, Clone, PartialEq, Debug, Constructor)]
pub struct Pointer {
    pub id: PointerId,
    pub pos: Point,
}

/// A raw motion event as delivered by the host.
#[derive(Clone, Debug)]
pub struct MotionEvent {
    pub action: ActionKind,
    /// The index of the pointer the action refers to. Only meaningful for
    /// [`ActionKind::PointerDown`] and [`ActionKind::PointerUp`].
    pub action_index: usize,
    /// All pointers that are down, ordered by pointer index. For `PointerUp` this still includes
    /// the departing pointer.
    pub pointers: Vec<Pointer>,
    pub time: Instant,
}

impl MotionEvent {
    pub fn new(action: ActionKind, pointers: Vec<Pointer>, time: Instant) -> Self {
        Self {
            action,
            action_index: 0,
            pointers,
            time,
        }
    }

    pub fn with_action_index(mut self, action_index: usize) -> Self {
        self.action_index = action_index;
        self
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }
}
