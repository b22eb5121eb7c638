//! Listener capabilities, one per gesture.
//!
//! For all listeners, the return value decides what happens with the detection:
//!
//! - `true`: the listener handled the detection. The recognizer commits its current measurement
//!   as the new reference.
//! - `false`: the reference is kept, the next detection is measured from the same baseline. This
//!   way a listener can wait for a larger movement before it reacts.
//!
//! All methods default to rejecting, so hosts implement only the gestures they care about.
use crate::recognizers::{
    DoubleTapRecognizer, DragRecognizer, FlyRecognizer, RotateRecognizer, ScaleRecognizer,
    TapRecognizer,
};

pub trait TapListener {
    fn on_tap(&mut self, _tap: &TapRecognizer) -> bool {
        false
    }
}

pub trait DoubleTapListener {
    fn on_double_tap(&mut self, _double_tap: &DoubleTapRecognizer) -> bool {
        false
    }
}

pub trait DragListener {
    fn on_drag(&mut self, _drag: &DragRecognizer) -> bool {
        false
    }
}

pub trait FlyListener {
    fn on_fly(&mut self, _fly: &FlyRecognizer) -> bool {
        false
    }
}

pub trait ScaleListener {
    fn on_scale(&mut self, _scale: &ScaleRecognizer) -> bool {
        false
    }
}

pub trait RotateListener {
    fn on_rotate(&mut self, _rotate: &RotateRecognizer) -> bool {
        false
    }
}

/// All listener capabilities combined.
pub trait GestureListener:
    TapListener + DoubleTapListener + DragListener + FlyListener + ScaleListener + RotateListener
{
}

impl<T> GestureListener for T where
    T: TapListener + DoubleTapListener + DragListener + FlyListener + ScaleListener + RotateListener
{
}
