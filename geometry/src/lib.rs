//! Geometry primitives, taken from the BrainSharper project at 20230701

mod point;

pub use point::*;
