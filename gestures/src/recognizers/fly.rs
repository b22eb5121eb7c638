use std::fmt;

use log::{debug, trace};
use massive_geometry::Vector;

use crate::{
    FlyListener, Recognizer, TouchFrame,
    velocity::{EstimatorFactory, VelocityEstimator, default_estimator},
};

#[derive(Copy, Clone, Debug)]
pub struct FlyConfig {
    /// Minimum velocity in px/s on either axis.
    pub min_velocity: f64,
    /// Velocities are capped to this value in px/s.
    pub max_velocity: f64,
}

/// Fling of the primary pointer, detected when the stream ends.
///
/// A fling fires if the x _or_ the y velocity reaches the minimum velocity. The axes are compared
/// independently and signed, a fling towards negative coordinates does not fire.
#[derive(Debug)]
pub struct FlyRecognizer {
    config: FlyConfig,
    acquire_estimator: EstimatorFactory,
    /// Held from the first frame of a stream until it completes.
    estimator: Option<Box<dyn VelocityEstimator>>,
    velocity: Vector,
}

impl FlyRecognizer {
    pub fn new(config: FlyConfig) -> Self {
        Self::with_estimator(config, default_estimator)
    }

    pub fn with_estimator(config: FlyConfig, acquire_estimator: EstimatorFactory) -> Self {
        Self {
            config,
            acquire_estimator,
            estimator: None,
            velocity: Vector::default(),
        }
    }

    pub fn config(&self) -> &FlyConfig {
        &self.config
    }

    /// Velocity of the primary pointer at the time the stream ended, in px/s.
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// `true` while an estimator is held.
    pub fn is_tracking(&self) -> bool {
        self.estimator.is_some()
    }

    fn release(&mut self) {
        if self.estimator.take().is_some() {
            debug!("Fly: velocity estimator released");
        }
    }
}

impl<L: FlyListener + ?Sized> Recognizer<L> for FlyRecognizer {
    fn on_frame(&mut self, frame: &TouchFrame, listener: &mut L) -> bool {
        if frame.config_changed() {
            let acquire = self.acquire_estimator;
            let estimator = self.estimator.get_or_insert_with(acquire);
            if frame.is_down() {
                // Leftovers of a stream we did not see completing.
                estimator.clear();
            }
        }

        let mut handled = false;
        if let Some(estimator) = &mut self.estimator {
            estimator.add_movement(frame.time(), frame.pointers());

            if frame.is_up()
                && let Some(primary) = frame.pointers().first()
            {
                self.velocity = estimator.velocity(primary.id, self.config.max_velocity);
                let min = self.config.min_velocity;
                if self.velocity.x >= min || self.velocity.y >= min {
                    trace!("Fly: {self}");
                    handled = listener.on_fly(self);
                }
            }
        }

        if frame.stream_completed() {
            self.release();
        }

        handled
    }

    fn end_stream(&mut self) {
        self.release();
    }
}

impl fmt::Display for FlyRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vx: {}, vy: {}", self.velocity.x, self.velocity.y)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::{
        ActionKind::*,
        testing::{Recorder, frame},
    };

    fn recognizer() -> FlyRecognizer {
        FlyRecognizer::new(FlyConfig {
            min_velocity: 50.0,
            max_velocity: 8000.0,
        })
    }

    /// A stream of a single pointer moving by `step` every 10ms.
    fn swipe(
        fly: &mut FlyRecognizer,
        recorder: &mut Recorder,
        step: (f64, f64),
        end: crate::ActionKind,
    ) -> bool {
        let origin = Instant::now();
        let mut handled = false;
        for i in 0..6u64 {
            let action = match i {
                0 => Down,
                5 => end,
                _ => Move,
            };
            let (x, y) = (100.0 + i as f64 * step.0, 100.0 + i as f64 * step.1);
            handled = fly.on_frame(&frame(origin, i * 10, action, 0, &[(0, x, y)]), recorder);
            if i < 5 {
                assert!(fly.is_tracking());
            }
        }
        handled
    }

    #[test]
    fn fast_swipe_fires_with_separate_axes() {
        let mut fly = recognizer();
        let mut recorder = Recorder::accepting();

        assert!(swipe(&mut fly, &mut recorder, (20.0, 5.0), Up));
        assert_eq!(recorder.flies.len(), 1);
        let velocity = recorder.flies[0];
        assert!((velocity.x - 2000.0).abs() < 1e-6);
        // The y velocity is queried on its own axis.
        assert!((velocity.y - 500.0).abs() < 1e-6);
        assert!(!fly.is_tracking());
    }

    #[test]
    fn slow_movement_does_not_fire() {
        let mut fly = recognizer();
        let mut recorder = Recorder::accepting();

        assert!(!swipe(&mut fly, &mut recorder, (0.2, 0.1), Up));
        assert!(recorder.flies.is_empty());
        assert!(!fly.is_tracking());
    }

    #[test]
    fn negative_velocity_does_not_fire() {
        let mut fly = recognizer();
        let mut recorder = Recorder::accepting();

        assert!(!swipe(&mut fly, &mut recorder, (-20.0, -20.0), Up));
        assert!(recorder.flies.is_empty());
        assert!(fly.velocity().x < 0.0);
    }

    #[test]
    fn cancel_releases_without_firing() {
        let mut fly = recognizer();
        let mut recorder = Recorder::accepting();

        assert!(!swipe(&mut fly, &mut recorder, (20.0, 0.0), Cancel));
        assert!(recorder.flies.is_empty());
        assert!(!fly.is_tracking());
    }

    #[test]
    fn end_stream_releases() {
        let mut fly = recognizer();
        let mut recorder = Recorder::accepting();
        fly.on_frame(&frame(Instant::now(), 0, Down, 0, &[(0, 0.0, 0.0)]), &mut recorder);
        assert!(fly.is_tracking());
        Recognizer::<Recorder>::end_stream(&mut fly);
        assert!(!fly.is_tracking());
    }
}
