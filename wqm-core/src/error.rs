/// Error types for measurement input handling
use thiserror::Error;

/// Rejections raised while turning user input into typed values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A date field did not parse as `YYYY-MM-DD`
    #[error("Invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    /// A time field did not parse as `HH:MM`
    #[error("Invalid time for {field}: {value:?} (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },

    /// A numeric field did not parse as a number
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// The date filter's lower bound is after its upper bound
    #[error("Date range is inverted: {from} is after {to}")]
    InvertedRange { from: String, to: String },

    /// Metric name not recognised
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
}

/// Type alias for Results using ValidationError
pub type Result<T> = std::result::Result<T, ValidationError>;
