//! STRAFE Core Types
//!
//! This crate contains pure types and logic with no I/O: stable player
//! identities, simulation ticks, movement-button bitmask interpretation,
//! and view-yaw turn classification.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buttons;
pub mod id;
pub mod tick;
pub mod yaw;

// Re-exports
pub use buttons::{ButtonMask, MoveAxis, IN_BACK, IN_FORWARD, IN_MOVELEFT, IN_MOVERIGHT, MOVEMENT_BITS};
pub use id::PlayerId;
pub use tick::{Tick, DEFAULT_TICK_RATE};
pub use yaw::{turn_direction, wrapped_turn_delta, TurnDirection};
