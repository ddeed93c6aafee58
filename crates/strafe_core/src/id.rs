//! Stable player identities.
//!
//! Decoder adapters resolve volatile in-engine entity handles to these ids
//! once, at adaptation time; everything downstream is keyed by `PlayerId`.

use serde::{Deserialize, Serialize};

/// Stable 64-bit player identifier (the account id a demo stream reports
/// for a participant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Create from a raw 64-bit account id.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Whether this id refers to a real participant. Id 0 is the engine's
    /// "no controller" sentinel and is never tracked.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
