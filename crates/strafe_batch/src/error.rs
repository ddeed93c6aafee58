//! Batch and per-file errors.

use thiserror::Error;

use strafe_demo::DemoError;

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The directory walk could not enumerate entries.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Failure analyzing one file; recorded in its outcome, never fatal to the
/// batch.
#[derive(Debug, Error)]
pub enum FileError {
    /// The demo file could not be opened or its metadata read.
    #[error("open failed: {0}")]
    Open(#[source] std::io::Error),

    /// Decoding the event stream failed.
    #[error(transparent)]
    Decode(#[from] DemoError),

    /// Creating or writing the report failed.
    #[error("report write failed: {0}")]
    Report(#[source] std::io::Error),
}
