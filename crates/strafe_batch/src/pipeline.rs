//! Per-file analysis pipeline.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use strafe_analysis::{write_report, AnalysisSession, ReportRow};
use strafe_core::{Tick, DEFAULT_TICK_RATE};
use strafe_demo::{DemoBackend, DemoEvent};

use crate::config::BatchConfig;
use crate::error::FileError;

/// Sibling output path: the input with its extension replaced.
#[must_use]
pub fn report_path(path: &Path) -> PathBuf {
    path.with_extension("csv")
}

/// Successful analysis of one demo.
#[derive(Debug)]
pub struct FileReport {
    /// The analyzed demo file.
    pub path: PathBuf,
    /// Where the report was written.
    pub report: PathBuf,
    /// The emitted rows, one per player.
    pub rows: Vec<ReportRow>,
    /// Last tick observed in the stream.
    pub last_tick: Tick,
}

/// Analyze one demo file and write its report next to it.
///
/// The report file is created before decoding starts; when anything fails
/// the driver removes it, so a failed file leaves nothing behind.
///
/// # Errors
///
/// Returns an error when the file cannot be opened, the stream cannot be
/// decoded, or the report cannot be written.
pub fn analyze_demo(
    backend: &dyn DemoBackend,
    path: &Path,
    config: &BatchConfig,
) -> Result<FileReport, FileError> {
    let file = File::open(path).map_err(FileError::Open)?;
    let recorded_at = modified_stamp(&file).map_err(FileError::Open)?;

    let out_path = report_path(path);
    let out = File::create(&out_path).map_err(FileError::Report)?;

    let mut session = backend.open(Box::new(BufReader::new(file)))?;
    let mut analysis = AnalysisSession::new(recorded_at, config.analyzer);
    let mut sink = |event: &DemoEvent| analysis.apply(event);
    session.run(&mut sink)?;

    let last_tick = analysis.last_tick();
    let rows = analysis.into_rows();

    let mut writer = BufWriter::new(out);
    write_report(&mut writer, &rows).map_err(FileError::Report)?;
    writer.flush().map_err(FileError::Report)?;

    Ok(FileReport {
        path: path.to_path_buf(),
        report: out_path,
        rows,
        last_tick,
    })
}

fn modified_stamp(file: &File) -> std::io::Result<String> {
    let modified = file.metadata()?.modified()?;
    let stamp: DateTime<Local> = modified.into();
    Ok(stamp.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Render the per-file console summary for verbose mode.
#[must_use]
pub fn verbose_summary(report: &FileReport) -> String {
    let mut text = format!(
        "Game duration: {} ticks ({:.6} minutes)\n",
        report.last_tick,
        report.last_tick.as_minutes(DEFAULT_TICK_RATE)
    );
    for row in &report.rows {
        text.push_str(&format!(
            "{} ({}): W/S overlap ticks {}, A/D overlap ticks {}, good key switch count {}, total move ticks {}, good turns {}, airtime {}",
            row.name,
            row.player,
            row.forwardback_overlap_ticks,
            row.leftright_overlap_ticks,
            row.good_switches,
            row.total_move_ticks,
            row.good_turns,
            row.airborne_ticks,
        ));
        if row.air_turn_samples > 0 {
            text.push_str(&format!(
                ", average turn speed {:.6} ({} samples)",
                row.air_turn_mean, row.air_turn_samples
            ));
        }
        text.push('\n');
    }
    text
}
