//! Per-player accumulator state.

use serde::{Deserialize, Serialize};

use strafe_core::buttons::direct_reversal;
use strafe_core::{turn_direction, wrapped_turn_delta, ButtonMask, MoveAxis, Tick, TurnDirection};

/// Accumulator tunables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// When a single button transition both closes a momentary (one tick or
    /// shorter) overlap and reads as a direct reversal, the default is to
    /// credit a clean switch for each branch. Setting this credits it once.
    pub dedup_switches: bool,
}

impl AnalyzerConfig {
    /// Set [`AnalyzerConfig::dedup_switches`].
    #[must_use]
    pub const fn with_dedup_switches(mut self, dedup: bool) -> Self {
        self.dedup_switches = dedup;
        self
    }
}

/// Open/closed interval bookkeeping for one axis's opposing-key overlaps.
#[derive(Debug, Clone, Default)]
struct AxisOverlap {
    open: bool,
    start: Tick,
    spans: Vec<i32>,
}

impl AxisOverlap {
    fn open_at(&mut self, tick: Tick) {
        self.open = true;
        self.start = tick;
    }

    /// Close the interval. Spans longer than one tick are recorded; shorter
    /// ones count as a clean switch. Returns whether a switch was credited.
    fn close_at(&mut self, tick: Tick) -> bool {
        self.open = false;
        let span = tick.delta_since(self.start);
        if span > 1 {
            self.spans.push(span);
            false
        } else {
            true
        }
    }

    fn total(&self) -> i32 {
        self.spans.iter().sum()
    }
}

/// Running movement-input statistics for one player.
///
/// Created lazily on the first observed button change for the player and
/// frozen by [`PlayerMoveState::freeze`]; a frozen state ignores every
/// further update.
#[derive(Debug, Clone)]
pub struct PlayerMoveState {
    tracking: bool,
    last_buttons: ButtonMask,
    overlaps: [AxisOverlap; 2],
    good_switches: u32,
    moving: bool,
    move_start: Tick,
    total_move_ticks: i32,
    last_yaw: f32,
    turn_direction: TurnDirection,
    good_turns: u32,
    airborne_ticks: u32,
    air_turn_samples: Vec<f64>,
}

impl PlayerMoveState {
    /// Fresh, tracking state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracking: true,
            last_buttons: ButtonMask::empty(),
            overlaps: [AxisOverlap::default(), AxisOverlap::default()],
            good_switches: 0,
            moving: false,
            move_start: Tick::zero(),
            total_move_ticks: 0,
            last_yaw: 0.0,
            turn_direction: TurnDirection::None,
            good_turns: 0,
            airborne_ticks: 0,
            air_turn_samples: Vec::new(),
        }
    }

    /// Whether this state still accepts updates.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Apply a button-mask change observed at `tick`.
    pub fn on_buttons(&mut self, buttons: ButtonMask, tick: Tick, config: &AnalyzerConfig) {
        if !self.tracking {
            return;
        }

        // Movement-attempt edges: any movement key down opens the interval,
        // all released closes it.
        if buttons.any_movement() && !self.moving {
            self.moving = true;
            self.move_start = tick;
        } else if !buttons.any_movement() && self.moving {
            self.total_move_ticks += tick.delta_since(self.move_start);
            self.moving = false;
        }

        // Opposing-key overlaps. An event arriving while both keys stay held
        // re-stamps the start tick; the decoder fires on any button change,
        // movement-related or not.
        let mut momentary = false;
        for axis in MoveAxis::ALL {
            let slot = &mut self.overlaps[axis.index()];
            if buttons.overlapping(axis) {
                slot.open_at(tick);
            } else if slot.open && slot.close_at(tick) {
                self.good_switches += 1;
                momentary = true;
            }
        }

        // Direct reversals are clean switches even without any overlap.
        let reversal = MoveAxis::ALL
            .iter()
            .any(|&axis| direct_reversal(self.last_buttons, buttons, axis));
        if reversal && !(config.dedup_switches && momentary) {
            self.good_switches += 1;
        }

        self.last_buttons = buttons.movement();
    }

    /// Apply one per-simulation-tick sample.
    pub fn on_player_tick(&mut self, grounded: bool, view_yaw: f32) {
        if !self.tracking {
            return;
        }
        let direction = turn_direction(self.last_yaw, view_yaw);
        if !grounded {
            self.airborne_ticks += 1;
            if direction.is_turning() {
                self.air_turn_samples
                    .push(wrapped_turn_delta(self.last_yaw, view_yaw, direction));
            }
            if direction.reverses(self.turn_direction) {
                self.good_turns += 1;
            }
        }
        self.turn_direction = direction;
        self.last_yaw = view_yaw;
    }

    /// Stop tracking and close any interval still open at `last_tick`.
    pub fn freeze(&mut self, last_tick: Tick) {
        self.tracking = false;
        if self.moving {
            self.total_move_ticks += last_tick.delta_since(self.move_start);
            self.moving = false;
        }
        for axis in MoveAxis::ALL {
            let slot = &mut self.overlaps[axis.index()];
            if slot.open && slot.close_at(last_tick) {
                self.good_switches += 1;
            }
        }
    }

    /// Number of recorded overlaps on `axis`.
    #[must_use]
    pub fn overlap_count(&self, axis: MoveAxis) -> usize {
        self.overlaps[axis.index()].spans.len()
    }

    /// Total recorded overlap ticks on `axis`.
    #[must_use]
    pub fn overlap_total(&self, axis: MoveAxis) -> i32 {
        self.overlaps[axis.index()].total()
    }

    /// Mean overlap length on `axis`, 0 when none were recorded.
    #[must_use]
    pub fn overlap_average(&self, axis: MoveAxis) -> f32 {
        let count = self.overlap_count(axis);
        if count == 0 {
            0.0
        } else {
            self.overlap_total(axis) as f32 / count as f32
        }
    }

    /// Recorded overlap spans on `axis`, in completion order.
    #[must_use]
    pub fn overlap_spans(&self, axis: MoveAxis) -> &[i32] {
        &self.overlaps[axis.index()].spans
    }

    /// Clean direction switches credited so far.
    #[must_use]
    pub const fn good_switches(&self) -> u32 {
        self.good_switches
    }

    /// Total ticks spent with at least one movement key held.
    #[must_use]
    pub const fn total_move_ticks(&self) -> i32 {
        self.total_move_ticks
    }

    /// Airborne turn-direction reversals.
    #[must_use]
    pub const fn good_turns(&self) -> u32 {
        self.good_turns
    }

    /// Ticks spent airborne.
    #[must_use]
    pub const fn airborne_ticks(&self) -> u32 {
        self.airborne_ticks
    }

    /// Per-tick airborne yaw deltas, in degrees.
    #[must_use]
    pub fn air_turn_samples(&self) -> &[f64] {
        &self.air_turn_samples
    }

    /// Mean airborne yaw delta, 0 when no samples were taken.
    #[must_use]
    pub fn mean_air_turn(&self) -> f64 {
        if self.air_turn_samples.is_empty() {
            0.0
        } else {
            self.air_turn_samples.iter().sum::<f64>() / self.air_turn_samples.len() as f64
        }
    }
}

impl Default for PlayerMoveState {
    fn default() -> Self {
        Self::new()
    }
}
