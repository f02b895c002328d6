//! Gesture callbacks delivered by the AR surface.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Phase of a continuous gesture.
///
/// Numbered the way the AR surface reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    Began = 1,
    Changed = 2,
    Ended = 3,
}

impl GestureState {
    pub fn is_terminal(self) -> bool {
        self == Self::Ended
    }
}

impl TryFrom<u8> for GestureState {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::Began),
            2 => Ok(Self::Changed),
            3 => Ok(Self::Ended),
            other => Err(Error::UnknownGestureState(other)),
        }
    }
}

impl std::fmt::Display for GestureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Began => write!(f, "BEGAN"),
            Self::Changed => write!(f, "CHANGED"),
            Self::Ended => write!(f, "ENDED"),
        }
    }
}

/// One gesture callback from the AR surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GestureEvent {
    /// Object dragged to a new world position
    Drag { position: [f32; 3] },
    /// Pinch with cumulative scale factor for this gesture
    Pinch { state: GestureState, factor: f32 },
    /// Rotation with cumulative angle in degrees for this gesture
    Rotate { state: GestureState, delta: f32 },
}
