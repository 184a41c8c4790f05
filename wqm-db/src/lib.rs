//! SQLite persistence layer for water quality measurements.
//!
//! # Architecture
//!
//! - [`Database`] only remembers the database file path. Every operation opens
//!   its own `rusqlite::Connection` and drops it before returning, so a
//!   handle is never shared between concurrent callers and is released on
//!   every exit path, including `?` early returns.
//! - [`MeasurementStore`] is the read/write interface the dashboard works
//!   against. There is no in-process copy of the table; each read goes to
//!   SQLite and sees every committed write.
//! - CSV interchange (`Fecha,Hora,pH,Turbidez,Conductividad,Temperatura`)
//!   lives in [`loader`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use wqm_core::{DateFilter, NewMeasurement};
//! use wqm_db::{Database, MeasurementStore};
//!
//! let db = Database::open("agua.db").unwrap();
//! let id = db
//!     .insert(&NewMeasurement {
//!         date: "2024-01-01".to_string(),
//!         time: "08:00".to_string(),
//!         ph: 7.1,
//!         turbidity: 2.0,
//!         conductivity: 300.0,
//!         temperature: 18.0,
//!     })
//!     .unwrap();
//! let rows = db.query(&DateFilter::unbounded()).unwrap();
//! assert!(rows.iter().any(|r| r.id == id));
//! ```

pub mod loader;
pub mod models;
mod queries;
pub mod schema;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wqm_core::{DateFilter, Measurement, NewMeasurement};

pub use loader::export_csv;
pub use models::{DateBounds, ImportReport};

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Durable log of measurements.
///
/// Implementations must make writes visible to the next read and must not
/// hold a handle across calls.
pub trait MeasurementStore: Send + Sync {
    /// Append one row and return its freshly assigned id.
    fn insert(&self, measurement: &NewMeasurement) -> anyhow::Result<i64>;

    /// Remove every row whose id is listed. Unknown ids are ignored.
    /// Returns how many rows were actually removed.
    fn delete(&self, ids: &[i64]) -> anyhow::Result<usize>;

    /// Rows inside the filter ordered by `(date, time, id)`.
    fn query(&self, filter: &DateFilter) -> anyhow::Result<Vec<Measurement>>;

    /// Earliest and latest stored dates, `None` when the store is empty.
    fn date_bounds(&self) -> anyhow::Result<Option<DateBounds>>;
}

/// A measurement store backed by a single SQLite file.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open (creating if needed) the database file and apply the schema.
    ///
    /// Failing here is meant to be fatal: callers run this once at startup.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = db.connect()?;
        conn.execute_batch(schema::create_schema())?;
        log::info!("[WQM] db: opened {}", db.path.display());
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A fresh connection scoped to the caller.
    pub(crate) fn connect(&self) -> anyhow::Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}
