//! Decoder-boundary errors.

use thiserror::Error;

/// Result alias for decoder operations.
pub type DemoResult<T> = Result<T, DemoError>;

/// Errors produced while turning a demo stream into events.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The underlying stream could not be read.
    #[error("demo read failed: {0}")]
    Io(#[from] std::io::Error),

    /// A journal line was not a valid event.
    #[error("malformed event at line {line}: {source}")]
    MalformedEvent {
        /// 1-based line number within the journal.
        line: usize,
        /// The decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// An event could not be encoded back out.
    #[error("event encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The backend rejected the stream outright.
    #[error("unsupported demo stream: {reason}")]
    Unsupported {
        /// Why the stream was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DemoError::Unsupported {
            reason: "bad magic".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported demo stream: bad magic");
    }

    #[test]
    fn test_malformed_carries_line() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DemoError::MalformedEvent { line: 7, source };
        assert!(err.to_string().contains("line 7"));
    }
}
