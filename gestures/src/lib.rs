//! Touch gesture recognition.
//!
//! Motion events are reduced to [`TouchFrame`]s and fed to the recognizers a [`GestureDetector`]
//! owns. Recognizers report through the listener traits, a listener returning `true` accepts the
//! gesture's current state as the new baseline.
mod action;
mod config;
mod detector;
mod frame;
mod gesture;
mod listener;
mod motion_event;
mod recognizer;
pub mod recognizers;
mod touch_aggregator;
pub mod velocity;

#[cfg(test)]
mod testing;

pub use action::*;
pub use config::*;
pub use detector::*;
pub use frame::*;
pub use gesture::*;
pub use listener::*;
pub use motion_event::*;
pub use recognizers::*;
pub use touch_aggregator::*;
pub use velocity::{EstimatorFactory, VelocityEstimator, VelocityTracker};

use recognizer::Recognizer;
