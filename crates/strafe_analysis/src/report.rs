//! Report rows and delimited rendering.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use strafe_core::{MoveAxis, PlayerId};

use crate::state::PlayerMoveState;

/// Header line of the delimited per-file report.
pub const REPORT_HEADER: &str = "Date,PlayerID64,Name,A/D overlap (instances),A/D overlap (ticks),A/D overlap (tick/instance),W/S overlap (instances),W/S overlap (ticks),W/S overlap (tick/instance),Good Strafe Switch,Total Move Ticks,Good Airstrafe Turns,Total Airtime";

/// One report line for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Modification time of the demo file, `%Y-%m-%d %H:%M:%S`.
    pub recorded_at: String,
    /// Stable player identity.
    pub player: PlayerId,
    /// Display name, empty when the roster never announced one.
    pub name: String,
    /// Completed left/right overlaps.
    pub leftright_overlaps: usize,
    /// Total ticks spent in left/right overlaps.
    pub leftright_overlap_ticks: i32,
    /// Mean left/right overlap length, 0 when none.
    pub leftright_ticks_per_overlap: f32,
    /// Completed forward/back overlaps.
    pub forwardback_overlaps: usize,
    /// Total ticks spent in forward/back overlaps.
    pub forwardback_overlap_ticks: i32,
    /// Mean forward/back overlap length, 0 when none.
    pub forwardback_ticks_per_overlap: f32,
    /// Clean direction switches.
    pub good_switches: u32,
    /// Total ticks with at least one movement key held.
    pub total_move_ticks: i32,
    /// Airborne turn-direction reversals.
    pub good_turns: u32,
    /// Ticks spent airborne.
    pub airborne_ticks: u32,
    /// Mean airborne yaw delta in degrees, 0 when no samples.
    pub air_turn_mean: f64,
    /// Number of airborne yaw samples behind the mean.
    pub air_turn_samples: usize,
}

impl ReportRow {
    /// Build a row from a finalized player state.
    #[must_use]
    pub fn from_state(
        recorded_at: String,
        player: PlayerId,
        name: String,
        state: &PlayerMoveState,
    ) -> Self {
        Self {
            recorded_at,
            player,
            name,
            leftright_overlaps: state.overlap_count(MoveAxis::LeftRight),
            leftright_overlap_ticks: state.overlap_total(MoveAxis::LeftRight),
            leftright_ticks_per_overlap: state.overlap_average(MoveAxis::LeftRight),
            forwardback_overlaps: state.overlap_count(MoveAxis::ForwardBack),
            forwardback_overlap_ticks: state.overlap_total(MoveAxis::ForwardBack),
            forwardback_ticks_per_overlap: state.overlap_average(MoveAxis::ForwardBack),
            good_switches: state.good_switches(),
            total_move_ticks: state.total_move_ticks(),
            good_turns: state.good_turns(),
            airborne_ticks: state.airborne_ticks(),
            air_turn_mean: state.mean_air_turn(),
            air_turn_samples: state.air_turn_samples().len(),
        }
    }

    /// Render the delimited report line, header column order.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{},{},{:.6},{},{},{},{}",
            self.recorded_at,
            self.player,
            self.name,
            self.leftright_overlaps,
            self.leftright_overlap_ticks,
            self.leftright_ticks_per_overlap,
            self.forwardback_overlaps,
            self.forwardback_overlap_ticks,
            self.forwardback_ticks_per_overlap,
            self.good_switches,
            self.total_move_ticks,
            self.good_turns,
            self.airborne_ticks,
        )
    }
}

/// Write the header and one line per row.
///
/// # Errors
///
/// Returns any write failure.
pub fn write_report<W: Write>(out: &mut W, rows: &[ReportRow]) -> io::Result<()> {
    writeln!(out, "{REPORT_HEADER}")?;
    for row in rows {
        writeln!(out, "{}", row.to_line())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ReportRow {
        ReportRow {
            recorded_at: "2024-03-01 18:30:00".to_string(),
            player: PlayerId::from_raw(76561198000000001),
            name: "alice".to_string(),
            leftright_overlaps: 2,
            leftright_overlap_ticks: 7,
            leftright_ticks_per_overlap: 3.5,
            forwardback_overlaps: 0,
            forwardback_overlap_ticks: 0,
            forwardback_ticks_per_overlap: 0.0,
            good_switches: 4,
            total_move_ticks: 1200,
            good_turns: 9,
            airborne_ticks: 300,
            air_turn_mean: 2.25,
            air_turn_samples: 120,
        }
    }

    #[test]
    fn test_header_column_count_matches_rows() {
        let line = sample_row().to_line();
        assert_eq!(
            line.split(',').count(),
            REPORT_HEADER.split(',').count()
        );
    }

    #[test]
    fn test_line_rendering() {
        let line = sample_row().to_line();
        assert_eq!(
            line,
            "2024-03-01 18:30:00,76561198000000001,alice,2,7,3.500000,0,0,0.000000,4,1200,9,300"
        );
    }

    #[test]
    fn test_write_report() {
        let mut out = Vec::new();
        write_report(&mut out, &[sample_row()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(REPORT_HEADER));
        assert!(lines.next().unwrap().starts_with("2024-03-01"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let mut out = Vec::new();
        write_report(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), REPORT_HEADER);
    }
}
