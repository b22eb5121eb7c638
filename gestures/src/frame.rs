//! The per event snapshot all recognizers share.
//!
//! A [`TouchFrame`] is reduced once from a [`MotionEvent`] and then handed to every recognizer by
//! reference.
use std::time::Instant;

use log::warn;
use massive_geometry::Point;

use crate::{ActionKind, MotionEvent, Pointer};

#[derive(Clone, Debug)]
pub struct TouchFrame {
    action: ActionKind,
    config_changed: bool,
    stream_completed: bool,
    pointers: Vec<Pointer>,
    /// The index of the pointer that leaves with this frame.
    excluded: Option<usize>,
    effective_pointer_count: usize,
    pivot: Point,
    time: Instant,
}

impl TouchFrame {
    /// Reduces a motion event into a frame.
    ///
    /// The pivot is the centroid of all pointers except the one leaving with a
    /// [`ActionKind::PointerUp`]. If no pointer is left to average, `previous_pivot` is kept.
    pub fn reduce(event: &MotionEvent, previous_pivot: Point) -> Self {
        let pointer_count = event.pointer_count();

        let excluded = match event.action {
            ActionKind::PointerUp if event.action_index < pointer_count => Some(event.action_index),
            ActionKind::PointerUp => {
                warn!(
                    "Pointer up with action index {} out of range, pointer count: {pointer_count}",
                    event.action_index
                );
                None
            }
            _ => None,
        };

        let effective_pointer_count = pointer_count - usize::from(excluded.is_some());

        let pivot = if effective_pointer_count == 0 {
            warn!("No pointers left to compute the pivot for {}", event.action);
            previous_pivot
        } else {
            let sum = event
                .pointers
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != excluded)
                .fold(Point::default(), |sum, (_, pointer)| sum + pointer.pos);
            sum / effective_pointer_count as f64
        };

        Self {
            action: event.action,
            config_changed: event.action.changes_config(),
            stream_completed: event.action.completes_stream(),
            pointers: event.pointers.clone(),
            excluded,
            effective_pointer_count,
            pivot,
            time: event.time,
        }
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    /// The pointer set changed, recognizers re-baseline instead of detecting.
    pub fn config_changed(&self) -> bool {
        self.config_changed
    }

    /// The stream ends with this frame.
    pub fn stream_completed(&self) -> bool {
        self.stream_completed
    }

    /// `true` for [`ActionKind::Down`].
    pub fn is_down(&self) -> bool {
        self.action == ActionKind::Down
    }

    /// `true` for [`ActionKind::Move`].
    pub fn is_move(&self) -> bool {
        self.action == ActionKind::Move
    }

    /// `true` for [`ActionKind::Up`].
    pub fn is_up(&self) -> bool {
        self.action == ActionKind::Up
    }

    /// Number of pointers reported with the event, including a leaving one.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Pointer count without the leaving pointer. Used as the divisor for all averages.
    pub fn effective_pointer_count(&self) -> usize {
        self.effective_pointer_count
    }

    pub fn excluded_pointer_index(&self) -> Option<usize> {
        self.excluded
    }

    /// All pointers reported with the event, ordered by pointer index.
    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    /// The pointers that take part in this frame's geometry, ordered by pointer index.
    pub fn active_pointers(&self) -> impl Iterator<Item = &Pointer> {
        let excluded = self.excluded;
        self.pointers
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != excluded)
            .map(|(_, pointer)| pointer)
    }

    /// Centroid of the active pointers.
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn time(&self) -> Instant {
        self.time
    }
}
