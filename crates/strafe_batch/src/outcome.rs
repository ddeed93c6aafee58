//! Per-file outcomes and the batch summary.

use std::path::PathBuf;

use serde::Serialize;

/// Result of one file's analysis.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// The demo file.
    pub path: PathBuf,
    /// Error text when the analysis failed.
    pub error: Option<String>,
}

impl FileOutcome {
    /// Successful outcome.
    #[must_use]
    pub fn success(path: PathBuf) -> Self {
        Self { path, error: None }
    }

    /// Failed outcome.
    #[must_use]
    pub fn failure(path: PathBuf, error: impl std::fmt::Display) -> Self {
        Self {
            path,
            error: Some(error.to_string()),
        }
    }

    /// Whether the analysis succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// All outcomes of one batch run, in completion order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// One outcome per analyzed file.
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    /// Number of files analyzed successfully.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of files that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// The failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_flags() {
        let ok = FileOutcome::success(PathBuf::from("a.dem"));
        assert!(ok.is_success());
        let bad = FileOutcome::failure(PathBuf::from("b.dem"), "boom");
        assert!(!bad.is_success());
        assert_eq!(bad.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary {
            outcomes: vec![
                FileOutcome::success(PathBuf::from("a.dem")),
                FileOutcome::failure(PathBuf::from("b.dem"), "boom"),
                FileOutcome::success(PathBuf::from("c.dem")),
            ],
        };
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        let failed: Vec<_> = summary.failures().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].path, PathBuf::from("b.dem"));
    }
}
