//! SQL schema for the measurement store.
//!
//! Applied as a single batch every time the database is opened.

/// Returns the full SQL schema as a single batch string.
///
/// `measurements` holds one row per reading. `AUTOINCREMENT` keeps ids
/// strictly increasing and prevents SQLite from handing out the id of a
/// deleted row again. `date` and `time` are `YYYY-MM-DD` / `HH:MM` text so
/// that ordering by the columns is chronological.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS measurements (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        time TEXT NOT NULL,
        ph REAL NOT NULL,
        turbidity REAL NOT NULL,
        conductivity REAL NOT NULL,
        temperature REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_measurements_date_time ON measurements(date, time);
    "#
}
