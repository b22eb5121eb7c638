use std::fmt;

use serde::Deserialize;

/// The kind of a raw motion event.
///
/// `Other` carries platform specific action codes this crate does not know about. Frames with
/// such an action are ignored by the detector.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Down,
    Move,
    Up,
    Cancel,
    PointerDown,
    PointerUp,
    Outside,
    #[serde(skip)]
    Other(i32),
}

impl ActionKind {
    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const MOVE: i32 = 2;
    pub const CANCEL: i32 = 3;
    pub const OUTSIDE: i32 = 4;
    pub const POINTER_DOWN: i32 = 5;
    pub const POINTER_UP: i32 = 6;

    /// Converts a masked platform action code (the action without the pointer index bits).
    pub fn from_masked(code: i32) -> Self {
        use ActionKind::*;
        match code {
            Self::DOWN => Down,
            Self::UP => Up,
            Self::MOVE => Move,
            Self::CANCEL => Cancel,
            Self::OUTSIDE => Outside,
            Self::POINTER_DOWN => PointerDown,
            Self::POINTER_UP => PointerUp,
            other => Other(other),
        }
    }

    /// The pointer set composition changes with this action, recognizers re-baseline.
    pub fn changes_config(self) -> bool {
        matches!(
            self,
            ActionKind::Down | ActionKind::PointerDown | ActionKind::PointerUp
        )
    }

    /// The stream of events ends with this action.
    pub fn completes_stream(self) -> bool {
        matches!(self, ActionKind::Up | ActionKind::Cancel)
    }

    pub fn is_known(self) -> bool {
        !matches!(self, ActionKind::Other(_))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ActionKind::*;
        match self {
            Down => f.write_str("down"),
            Move => f.write_str("move"),
            Up => f.write_str("up"),
            Cancel => f.write_str("cancel"),
            PointerDown => f.write_str("pointer-down"),
            PointerUp => f.write_str("pointer-up"),
            Outside => f.write_str("outside"),
            Other(code) => write!(f, "other({code})"),
        }
    }
}
