//! Platform constants and how they map to the recognizers' parameters.
use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    Gesture, Gestures,
    recognizers::{DoubleTapConfig, DragConfig, FlyConfig, RotateConfig, ScaleConfig, TapConfig},
};

/// The order recognizers are driven in by default.
pub const DEFAULT_ORDER: [Gesture; 6] = [
    Gesture::Tap,
    Gesture::DoubleTap,
    Gesture::Rotate,
    Gesture::Scale,
    Gesture::Drag,
    Gesture::Fly,
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Distance in px a pointer may move and still be considered a tap. Also the drag slop.
    pub touch_slop: f64,
    /// Maximum distance in px between the two taps of a double tap.
    pub double_tap_slop: f64,
    /// Maximum time between the two taps of a double tap.
    pub double_tap_timeout_ms: u64,
    /// px/s
    pub min_fling_velocity: f64,
    /// px/s
    pub max_fling_velocity: f64,
    /// Radians.
    pub rotation_slop: f64,
    /// The gestures enabled initially.
    pub enabled: Vec<Gesture>,
    /// The order the recognizers see each frame in.
    pub order: [Gesture; 6],
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_slop: 100.0,
            double_tap_timeout_ms: 300,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            rotation_slop: RotateConfig::DEFAULT_ROTATION_SLOP,
            enabled: vec![
                Gesture::DoubleTap,
                Gesture::Drag,
                Gesture::Scale,
                Gesture::Rotate,
            ],
            order: DEFAULT_ORDER,
        }
    }
}

impl GestureConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml).context("Failed to parse gesture configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read gesture configuration {path:?}"))?;
        Self::from_toml_str(&toml).with_context(|| format!("In {path:?}"))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("touch_slop", self.touch_slop),
            ("double_tap_slop", self.double_tap_slop),
            ("rotation_slop", self.rotation_slop),
            ("min_fling_velocity", self.min_fling_velocity),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{name} must be a non-negative number, was {value}"
            );
        }
        ensure!(
            self.max_fling_velocity.is_finite() && self.max_fling_velocity > 0.0,
            "max_fling_velocity must be positive, was {}",
            self.max_fling_velocity
        );
        if self.min_fling_velocity > self.max_fling_velocity {
            bail!(
                "min_fling_velocity ({}) exceeds max_fling_velocity ({})",
                self.min_fling_velocity,
                self.max_fling_velocity
            );
        }
        ensure!(
            self.order.iter().all_unique(),
            "order must name every gesture exactly once: {:?}",
            self.order
        );
        Ok(())
    }

    pub fn double_tap_timeout(&self) -> Duration {
        Duration::from_millis(self.double_tap_timeout_ms)
    }

    pub fn enabled_gestures(&self) -> Gestures {
        self.enabled.iter().copied().collect()
    }

    pub fn tap(&self) -> TapConfig {
        TapConfig {
            slop_square: self.touch_slop * self.touch_slop,
        }
    }

    pub fn double_tap(&self) -> DoubleTapConfig {
        DoubleTapConfig {
            timeout: self.double_tap_timeout(),
            slop_square: self.double_tap_slop * self.double_tap_slop,
        }
    }

    pub fn drag(&self) -> DragConfig {
        DragConfig {
            slop_square: self.touch_slop * self.touch_slop,
        }
    }

    pub fn fly(&self) -> FlyConfig {
        FlyConfig {
            min_velocity: self.min_fling_velocity,
            max_velocity: self.max_fling_velocity,
        }
    }

    pub fn scale(&self) -> ScaleConfig {
        ScaleConfig {
            span_slop: self.touch_slop * 2.0,
        }
    }

    pub fn rotate(&self) -> RotateConfig {
        RotateConfig {
            rotation_slop: self.rotation_slop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GestureConfig::default();
        config.validate().unwrap();
        assert_eq!(config.enabled_gestures(), Gestures::DEFAULT_ENABLED);
        assert_eq!(config.tap().slop_square, 64.0);
        assert_eq!(config.drag().slop_square, 64.0);
        assert_eq!(config.double_tap().slop_square, 10_000.0);
        assert_eq!(config.scale().span_slop, 16.0);
        assert_eq!(config.double_tap().timeout, Duration::from_millis(300));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GestureConfig::from_toml_str(
            r#"
            touch_slop = 5.0
            enabled = ["tap", "fly", "drag"]
            "#,
        )
        .unwrap();
        assert_eq!(config.touch_slop, 5.0);
        assert_eq!(config.drag().slop_square, 25.0);
        assert_eq!(config.double_tap_timeout_ms, 300);
        assert_eq!(
            config.enabled_gestures(),
            Gestures::TAP | Gestures::FLY | Gestures::DRAG
        );
        assert_eq!(config.order, DEFAULT_ORDER);
    }

    #[test]
    fn order_must_be_unique() {
        let error = GestureConfig::from_toml_str(
            r#"order = ["tap", "tap", "drag", "fly", "scale", "rotate"]"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("order"));
    }

    #[test]
    fn inverted_fling_bounds_are_rejected() {
        let result = GestureConfig::from_toml_str(
            r#"
            min_fling_velocity = 9000.0
            max_fling_velocity = 100.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GestureConfig::from_toml_str("tuch_slop = 3.0").is_err());
        assert!(GestureConfig::from_toml_str(r#"enabled = ["swipe"]"#).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = GestureConfig::load("/nonexistent/gestures.toml").unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/gestures.toml"));
    }
}
