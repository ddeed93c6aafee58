//! Batch configuration.

use strafe_analysis::AnalyzerConfig;

/// Default ceiling on concurrently analyzed files.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Maximum files analyzed at the same time.
    pub max_concurrent: usize,
    /// Extension matched during directory walks, without the dot.
    pub extension: String,
    /// Print a per-file console summary after each successful analysis.
    pub verbose: bool,
    /// Accumulator tunables passed to every file's session.
    pub analyzer: AnalyzerConfig,
}

impl BatchConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            extension: "dem".to_string(),
            verbose: false,
            analyzer: AnalyzerConfig::default(),
        }
    }

    /// Set the concurrency ceiling. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Set the demo file extension to match.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Enable or disable the per-file console summary.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the accumulator tunables.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
