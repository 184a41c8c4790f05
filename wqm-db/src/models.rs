//! Result structs returned by the store besides measurements themselves.

use serde::Serialize;

/// First and last stored dates, used to prefill the date-range picker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateBounds {
    pub first: String,
    pub last: String,
}

/// Outcome of a CSV import.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ImportReport {
    /// Ids assigned to the imported rows, in file order.
    pub inserted: Vec<i64>,
    /// Rows left out because a field was blank or malformed.
    pub skipped: usize,
}
