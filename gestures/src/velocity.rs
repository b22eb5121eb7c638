//! Velocity estimation for fling detection.
use std::{
    collections::{HashMap, VecDeque},
    fmt,
    time::{Duration, Instant},
};

use massive_geometry::{Point, Vector};

use crate::{Pointer, PointerId};

/// Estimates pointer velocities from the positions seen in a stream.
pub trait VelocityEstimator: fmt::Debug {
    /// Adds the positions of all pointers at `time`.
    fn add_movement(&mut self, time: Instant, pointers: &[Pointer]);

    /// The velocity of `pointer` in px/s. Each axis is clamped to `-max_velocity..=max_velocity`.
    fn velocity(&self, pointer: PointerId, max_velocity: f64) -> Vector;

    fn clear(&mut self);
}

/// Creates an estimator at the beginning of a stream.
pub type EstimatorFactory = fn() -> Box<dyn VelocityEstimator>;

pub fn default_estimator() -> Box<dyn VelocityEstimator> {
    Box::new(VelocityTracker::default())
}

/// Samples kept per pointer.
const HISTORY_SIZE: usize = 20;

/// Only samples this recent take part in the estimation.
const HORIZON: Duration = Duration::from_millis(100);

/// A gap between two samples longer than this means that the pointer has stopped in between.
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Copy, Clone, Debug)]
struct Sample {
    time: Instant,
    pos: Point,
}

/// Least squares velocity estimation over the most recent samples of each pointer.
#[derive(Debug, Default)]
pub struct VelocityTracker {
    /// Samples per pointer, most recent last.
    samples: HashMap<PointerId, VecDeque<Sample>>,
}

impl VelocityTracker {
    /// The recent samples of a pointer, most recent first. Stops at the horizon or a gap.
    fn recent(&self, pointer: PointerId) -> Vec<Sample> {
        let Some(samples) = self.samples.get(&pointer) else {
            return Vec::new();
        };
        let Some(newest) = samples.back() else {
            return Vec::new();
        };

        let mut recent = Vec::with_capacity(samples.len());
        let mut previous = *newest;
        for sample in samples.iter().rev() {
            let age = newest.time.saturating_duration_since(sample.time);
            let gap = previous.time.saturating_duration_since(sample.time);
            if age > HORIZON || gap > ASSUME_STOPPED {
                break;
            }
            recent.push(*sample);
            previous = *sample;
        }
        recent
    }
}

impl VelocityEstimator for VelocityTracker {
    fn add_movement(&mut self, time: Instant, pointers: &[Pointer]) {
        for pointer in pointers {
            let samples = self.samples.entry(pointer.id).or_default();
            if samples.len() == HISTORY_SIZE {
                samples.pop_front();
            }
            samples.push_back(Sample {
                time,
                pos: pointer.pos,
            });
        }
    }

    fn velocity(&self, pointer: PointerId, max_velocity: f64) -> Vector {
        let recent = self.recent(pointer);
        if recent.len() < 2 || !max_velocity.is_finite() || max_velocity <= 0.0 {
            return Vector::default();
        }

        let newest = recent[0].time;
        // Times in seconds relative to the newest sample (all <= 0).
        let times: Vec<f64> = recent
            .iter()
            .map(|s| -newest.duration_since(s.time).as_secs_f64())
            .collect();

        let x = least_squares_slope(&times, recent.iter().map(|s| s.pos.x));
        let y = least_squares_slope(&times, recent.iter().map(|s| s.pos.y));
        Vector::new(
            x.clamp(-max_velocity, max_velocity),
            y.clamp(-max_velocity, max_velocity),
        )
    }

    fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Slope of the linear least squares fit of `values` over `times`. 0 if the times do not
/// spread.
fn least_squares_slope(times: &[f64], values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    let n = times.len() as f64;
    let mean_t = times.iter().sum::<f64>() / n;
    let mean_v = values.iter().sum::<f64>() / n;

    let (covariance, variance) = times.iter().zip(&values).fold(
        (0.0, 0.0),
        |(covariance, variance), (t, v)| {
            let dt = t - mean_t;
            (covariance + dt * (v - mean_v), variance + dt * dt)
        },
    );

    if variance <= f64::EPSILON {
        return 0.0;
    }
    covariance / variance
}
