//! View-yaw turn classification.
//!
//! Yaw is reported in degrees and wraps at the +/-180 seam. A jump of more
//! than 180 degrees between consecutive ticks is read as a short rotation
//! the other way around the circle, never as a near-full spin.

use serde::{Deserialize, Serialize};

/// Direction of yaw rotation between two consecutive ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum TurnDirection {
    /// Rotating right.
    Right = -1,
    /// Not rotating.
    #[default]
    None = 0,
    /// Rotating left.
    Left = 1,
}

impl TurnDirection {
    /// Signed representation, for reversal arithmetic.
    #[must_use]
    pub const fn sign(self) -> i8 {
        self as i8
    }

    /// Whether any rotation happened.
    #[must_use]
    pub const fn is_turning(self) -> bool {
        !matches!(self, Self::None)
    }

    /// True when `self` and `prev` are opposite nonzero directions.
    #[must_use]
    pub const fn reverses(self, prev: TurnDirection) -> bool {
        prev.sign() != 0 && prev.sign() + self.sign() == 0
    }
}

/// Classify the rotation from `old_yaw` to `new_yaw`.
#[must_use]
pub fn turn_direction(old_yaw: f32, new_yaw: f32) -> TurnDirection {
    if new_yaw == old_yaw {
        return TurnDirection::None;
    }
    if new_yaw < old_yaw - 180.0 || (new_yaw > old_yaw && new_yaw < old_yaw + 180.0) {
        TurnDirection::Right
    } else {
        TurnDirection::Left
    }
}

/// Magnitude in degrees of the rotation classified by [`turn_direction`],
/// wrapped across the seam so it always lands in `[0, 360)`.
#[must_use]
pub fn wrapped_turn_delta(old_yaw: f32, new_yaw: f32, direction: TurnDirection) -> f64 {
    let raw = match direction {
        TurnDirection::Right => f64::from(new_yaw) - f64::from(old_yaw),
        TurnDirection::Left => f64::from(old_yaw) - f64::from(new_yaw),
        TurnDirection::None => return 0.0,
    };
    if raw < 0.0 { raw + 360.0 } else { raw }
}
