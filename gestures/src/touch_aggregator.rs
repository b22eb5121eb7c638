//! Aggregates winit's per finger touch events into motion events that carry all pointers.
use std::time::Instant;

use log::warn;
use massive_geometry::Point;
use winit::event::{TouchPhase, WindowEvent};

use crate::{ActionKind, MotionEvent, Pointer, PointerId};

#[derive(Debug, Clone, Default)]
pub struct TouchAggregator {
    /// The pointers that are down, in the order they went down.
    pointers: Vec<Pointer>,
}

impl TouchAggregator {
    /// Converts a window event.
    ///
    /// `None` if the event is not a touch event, or if it is redundant, like a movement to the
    /// position the pointer is already at.
    pub fn update(&mut self, event: &WindowEvent, time: Instant) -> Option<MotionEvent> {
        match event {
            WindowEvent::Touch(touch) => self.touch(
                touch.id,
                touch.phase,
                Point::new(touch.location.x, touch.location.y),
                time,
            ),
            _ => None,
        }
    }

    pub fn touch(
        &mut self,
        id: PointerId,
        phase: TouchPhase,
        pos: Point,
        time: Instant,
    ) -> Option<MotionEvent> {
        match phase {
            TouchPhase::Started => self.started(id, pos, time),
            TouchPhase::Moved => self.moved(id, pos, time),
            TouchPhase::Ended => self.ended(id, pos, time),
            TouchPhase::Cancelled => self.cancelled(id, pos, time),
        }
    }

    /// The pointers that are currently down.
    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    fn started(&mut self, id: PointerId, pos: Point, time: Instant) -> Option<MotionEvent> {
        if let Some(index) = self.index_of(id) {
            warn!("Touch {id} started while it is down");
            self.pointers[index].pos = pos;
            return None;
        }

        let action = if self.pointers.is_empty() {
            ActionKind::Down
        } else {
            ActionKind::PointerDown
        };
        self.pointers.push(Pointer::new(id, pos));
        Some(self.event(action, self.pointers.len() - 1, time))
    }

    fn moved(&mut self, id: PointerId, pos: Point, time: Instant) -> Option<MotionEvent> {
        let index = self.index_of(id)?;
        if self.pointers[index].pos == pos {
            return None;
        }
        self.pointers[index].pos = pos;
        Some(self.event(ActionKind::Move, index, time))
    }

    fn ended(&mut self, id: PointerId, pos: Point, time: Instant) -> Option<MotionEvent> {
        let Some(index) = self.index_of(id) else {
            warn!("Touch {id} ended, but it was never started");
            return None;
        };

        self.pointers[index].pos = pos;
        let action = if self.pointers.len() == 1 {
            ActionKind::Up
        } else {
            ActionKind::PointerUp
        };
        // The leaving pointer is still part of the event.
        let event = self.event(action, index, time);
        self.pointers.remove(index);
        Some(event)
    }

    /// Cancellation ends the whole stream.
    fn cancelled(&mut self, id: PointerId, pos: Point, time: Instant) -> Option<MotionEvent> {
        if self.pointers.is_empty() {
            return None;
        }
        let index = self.index_of(id).unwrap_or_default();
        if let Some(pointer) = self.pointers.iter_mut().find(|p| p.id == id) {
            pointer.pos = pos;
        }
        let event = self.event(ActionKind::Cancel, index, time);
        self.pointers.clear();
        Some(event)
    }

    fn event(&self, action: ActionKind, action_index: usize, time: Instant) -> MotionEvent {
        MotionEvent::new(action, self.pointers.clone(), time).with_action_index(action_index)
    }

    fn index_of(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }
}
