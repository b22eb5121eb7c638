use std::fmt;

use bitflags::bitflags;
use serde::Deserialize;

/// The gesture kinds the detector recognizes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gesture {
    Tap,
    DoubleTap,
    Drag,
    Fly,
    Scale,
    Rotate,
}

impl Gesture {
    pub const ALL: [Gesture; 6] = [
        Gesture::Tap,
        Gesture::DoubleTap,
        Gesture::Drag,
        Gesture::Fly,
        Gesture::Scale,
        Gesture::Rotate,
    ];

    pub fn flag(self) -> Gestures {
        match self {
            Gesture::Tap => Gestures::TAP,
            Gesture::DoubleTap => Gestures::DOUBLE_TAP,
            Gesture::Drag => Gestures::DRAG,
            Gesture::Fly => Gestures::FLY,
            Gesture::Scale => Gestures::SCALE,
            Gesture::Rotate => Gestures::ROTATE,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gesture::Tap => "tap",
            Gesture::DoubleTap => "double-tap",
            Gesture::Drag => "drag",
            Gesture::Fly => "fly",
            Gesture::Scale => "scale",
            Gesture::Rotate => "rotate",
        })
    }
}

bitflags! {
    /// A set of [`Gesture`]s.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Gestures: u8 {
        const TAP = 1 << 1;
        const DOUBLE_TAP = 1 << 2;
        const DRAG = 1 << 3;
        const FLY = 1 << 4;
        const SCALE = 1 << 5;
        const ROTATE = 1 << 6;
    }
}

impl Gestures {
    /// Tap and fly are opt-in.
    pub const DEFAULT_ENABLED: Gestures = Gestures::DOUBLE_TAP
        .union(Gestures::DRAG)
        .union(Gestures::SCALE)
        .union(Gestures::ROTATE);

    pub fn has(&self, gesture: Gesture) -> bool {
        self.contains(gesture.flag())
    }
}

impl From<Gesture> for Gestures {
    fn from(gesture: Gesture) -> Self {
        gesture.flag()
    }
}

impl FromIterator<Gesture> for Gestures {
    fn from_iter<T: IntoIterator<Item = Gesture>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Gestures::empty(), |set, gesture| set | gesture.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enabled_excludes_tap_and_fly() {
        let set = Gestures::DEFAULT_ENABLED;
        assert!(!set.has(Gesture::Tap));
        assert!(!set.has(Gesture::Fly));
        assert!(set.has(Gesture::DoubleTap));
        assert!(set.has(Gesture::Drag));
        assert!(set.has(Gesture::Scale));
        assert!(set.has(Gesture::Rotate));
    }

    #[test]
    fn collect_from_gestures() {
        let set: Gestures = Gesture::ALL.into_iter().collect();
        assert_eq!(set, Gestures::all());
        let set: Gestures = [Gesture::Tap, Gesture::Rotate].into_iter().collect();
        assert_eq!(set, Gestures::TAP | Gestures::ROTATE);
    }
}
