//! Core types for the water quality monitor.
//!
//! - [`measurement`]: stored rows and their chart ordering
//! - [`metric`]: the four sampled quantities
//! - [`submission`]: raw form input and its validation
//! - [`date_range`]: inclusive date filter used by every read
//! - [`error`]: validation errors

pub mod date_range;
pub mod error;
pub mod measurement;
pub mod metric;
pub mod submission;

pub use date_range::DateFilter;
pub use error::{Result, ValidationError};
pub use measurement::{Measurement, NewMeasurement};
pub use metric::Metric;
pub use submission::{Submission, SubmissionCheck};

/// Date format used for storage, CSV interchange and HTML date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time-of-day format used for storage and display.
pub const TIME_FORMAT: &str = "%H:%M";
