//! The closed event vocabulary the analyzer consumes.

use serde::{Deserialize, Serialize};
use strafe_core::{ButtonMask, PlayerId, Tick};

/// One decoded demo event.
///
/// Backends deliver these strictly in stream order. Every stream ends with
/// exactly one [`DemoEvent::StreamEnd`]; a [`DemoEvent::MatchEnd`] may or
/// may not precede it depending on whether the recording captured the
/// end-of-match announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DemoEvent {
    /// A participant became known to the decoder.
    PlayerSeen {
        /// Stable identity of the participant.
        player: PlayerId,
        /// Display name as recorded in the stream.
        name: String,
    },
    /// The button-down mask of a player changed.
    ButtonsChanged {
        /// Stable identity of the participant.
        player: PlayerId,
        /// The full new mask; consumers keep only the movement bits.
        buttons: ButtonMask,
        /// Tick the change was recorded at.
        tick: Tick,
    },
    /// Per-simulation-tick sample for one player.
    PlayerTick {
        /// Stable identity of the participant.
        player: PlayerId,
        /// Whether the player entity stood on something this tick.
        grounded: bool,
        /// Horizontal view angle in degrees.
        view_yaw: f32,
        /// The simulation tick.
        tick: Tick,
    },
    /// The decoder announced the end of the match.
    MatchEnd {
        /// Tick of the announcement.
        tick: Tick,
    },
    /// The underlying stream is exhausted.
    StreamEnd {
        /// Last tick observed in the stream.
        tick: Tick,
    },
}

impl DemoEvent {
    /// The tick this event is stamped with, when it carries one.
    #[must_use]
    pub const fn tick(&self) -> Option<Tick> {
        match self {
            Self::PlayerSeen { .. } => None,
            Self::ButtonsChanged { tick, .. }
            | Self::PlayerTick { tick, .. }
            | Self::MatchEnd { tick }
            | Self::StreamEnd { tick } => Some(*tick),
        }
    }

    /// Whether this event terminates per-player accumulation.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::MatchEnd { .. } | Self::StreamEnd { .. })
    }
}
