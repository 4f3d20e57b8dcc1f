//! Feature Pipeline Error Types

use thiserror::Error;

/// Structural errors that abort a pipeline run.
///
/// Malformed optional fields never surface here; they degrade to the
/// fallback value of their transform.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Mandatory source column absent from the input table
    #[error("Missing mandatory column: {0}")]
    MissingColumn(String),

    /// Violation date missing or unparseable
    #[error("Row {row}: invalid violation date {value:?}")]
    InvalidDate { row: usize, value: Option<String> },

    /// Row pushed with the wrong number of cells
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Relative-frequency threshold outside [0, 1)
    #[error("Invalid frequency threshold: {0}")]
    InvalidThreshold(f64),

    /// Statute pattern failed to compile
    #[error("Invalid statute pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, FeatureError>;
