//! Simulation ticks.
//!
//! The tick is the unit of every duration this workspace measures. Some
//! demo formats stamp warmup with negative ticks, so the counter is signed.

use serde::{Deserialize, Serialize};

/// Simulation ticks per second used when rendering durations as minutes.
pub const DEFAULT_TICK_RATE: f64 = 64.0;

/// One discrete simulation step of a recorded match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick(i32);

impl Tick {
    /// Tick zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create from a raw tick counter.
    #[must_use]
    pub const fn from_raw(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Span in ticks since `earlier`.
    #[must_use]
    pub const fn delta_since(&self, earlier: Tick) -> i32 {
        self.0 - earlier.0
    }

    /// Duration in minutes at `tick_rate` ticks per second.
    #[must_use]
    pub fn as_minutes(&self, tick_rate: f64) -> f64 {
        f64::from(self.0) / tick_rate / 60.0
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Tick {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
