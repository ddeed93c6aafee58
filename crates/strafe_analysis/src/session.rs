//! Per-file analysis session.

use indexmap::IndexMap;
use tracing::debug;

use strafe_core::{PlayerId, Tick};
use strafe_demo::DemoEvent;

use crate::report::ReportRow;
use crate::state::{AnalyzerConfig, PlayerMoveState};

/// Owns every player's accumulator for exactly one demo file.
///
/// Fed through [`AnalysisSession::apply`] in stream order; player state is
/// created lazily on the first button change observed for a player and kept
/// in first-seen order. Terminal events trigger the guarded finalizer, so a
/// match-end announcement followed by stream exhaustion reports once.
pub struct AnalysisSession {
    config: AnalyzerConfig,
    recorded_at: String,
    players: IndexMap<PlayerId, PlayerMoveState>,
    names: IndexMap<PlayerId, String>,
    last_tick: Tick,
    reported: bool,
    rows: Vec<ReportRow>,
}

impl AnalysisSession {
    /// Create a session. `recorded_at` becomes the timestamp column of
    /// every emitted row.
    #[must_use]
    pub fn new(recorded_at: impl Into<String>, config: AnalyzerConfig) -> Self {
        Self {
            config,
            recorded_at: recorded_at.into(),
            players: IndexMap::new(),
            names: IndexMap::new(),
            last_tick: Tick::zero(),
            reported: false,
            rows: Vec::new(),
        }
    }

    /// Dispatch one decoded event.
    pub fn apply(&mut self, event: &DemoEvent) {
        if let Some(tick) = event.tick() {
            self.last_tick = tick;
        }
        match event {
            DemoEvent::PlayerSeen { player, name } => {
                if player.is_valid() {
                    self.names.insert(*player, name.clone());
                }
            }
            DemoEvent::ButtonsChanged {
                player,
                buttons,
                tick,
            } => {
                if !player.is_valid() {
                    return;
                }
                let state = self.players.entry(*player).or_default();
                state.on_buttons(*buttons, *tick, &self.config);
            }
            DemoEvent::PlayerTick {
                player,
                grounded,
                view_yaw,
                ..
            } => {
                // Players never seen pressing a key have no state to update.
                if let Some(state) = self.players.get_mut(player) {
                    state.on_player_tick(*grounded, *view_yaw);
                }
            }
            DemoEvent::MatchEnd { .. } | DemoEvent::StreamEnd { .. } => {
                let emitted = self.finalize();
                self.rows.extend(emitted);
            }
        }
    }

    /// Flush open intervals, freeze every player, and emit one row per
    /// player ever observed.
    ///
    /// Idempotent: only the first call produces rows.
    pub fn finalize(&mut self) -> Vec<ReportRow> {
        if self.reported {
            return Vec::new();
        }
        self.reported = true;
        debug!(
            players = self.players.len(),
            last_tick = %self.last_tick,
            "finalizing analysis session"
        );
        let mut rows = Vec::with_capacity(self.players.len());
        for (player, state) in &mut self.players {
            state.freeze(self.last_tick);
            let name = self.names.get(player).cloned().unwrap_or_default();
            rows.push(ReportRow::from_state(
                self.recorded_at.clone(),
                *player,
                name,
                state,
            ));
        }
        rows
    }

    /// Consume the session, yielding the rows it reported. Finalizes first
    /// if no terminal event ever arrived.
    #[must_use]
    pub fn into_rows(mut self) -> Vec<ReportRow> {
        let tail = self.finalize();
        let mut rows = self.rows;
        rows.extend(tail);
        rows
    }

    /// Last tick observed on any event.
    #[must_use]
    pub const fn last_tick(&self) -> Tick {
        self.last_tick
    }

    /// Number of players observed so far.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
