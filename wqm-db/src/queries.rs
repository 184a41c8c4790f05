//! [`MeasurementStore`] implementation for [`Database`].
//!
//! Date bounds are always bound as statement parameters. A NULL bound leaves
//! that side of the range open.

use crate::models::DateBounds;
use crate::{Database, MeasurementStore};
use rusqlite::{params, Row};
use std::collections::BTreeSet;
use wqm_core::{DateFilter, Measurement, NewMeasurement};

const SELECT_MEASUREMENTS: &str = "SELECT id, date, time, ph, turbidity, conductivity, temperature
     FROM measurements
     WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
     ORDER BY date, time, id";

fn measurement_from_row(row: &Row<'_>) -> rusqlite::Result<Measurement> {
    Ok(Measurement {
        id: row.get(0)?,
        date: row.get(1)?,
        time: row.get(2)?,
        ph: row.get(3)?,
        turbidity: row.get(4)?,
        conductivity: row.get(5)?,
        temperature: row.get(6)?,
    })
}

impl MeasurementStore for Database {
    fn insert(&self, m: &NewMeasurement) -> anyhow::Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO measurements (date, time, ph, turbidity, conductivity, temperature)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![m.date, m.time, m.ph, m.turbidity, m.conductivity, m.temperature],
        )?;
        let id = conn.last_insert_rowid();
        log::info!("[WQM] db: inserted measurement {} ({} {})", id, m.date, m.time);
        Ok(id)
    }

    fn delete(&self, ids: &[i64]) -> anyhow::Result<usize> {
        let unique: BTreeSet<i64> = ids.iter().copied().collect();
        if unique.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let mut removed = 0usize;
        {
            let mut stmt = tx.prepare("DELETE FROM measurements WHERE id = ?1")?;
            for id in &unique {
                removed += stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        log::info!(
            "[WQM] db: deleted {} of {} requested measurements",
            removed,
            unique.len()
        );
        Ok(removed)
    }

    fn query(&self, filter: &DateFilter) -> anyhow::Result<Vec<Measurement>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_MEASUREMENTS)?;
        let rows = stmt
            .query_map(
                params![filter.from_text(), filter.to_text()],
                measurement_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[WQM] db: query {:?}..{:?} returned {} records",
            filter.from_text(),
            filter.to_text(),
            rows.len()
        );
        Ok(rows)
    }

    fn date_bounds(&self) -> anyhow::Result<Option<DateBounds>> {
        let conn = self.connect()?;
        let (first, last): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM measurements",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(first.zip(last).map(|(first, last)| DateBounds { first, last }))
    }
}

impl Database {
    /// Number of stored measurements.
    pub fn count(&self) -> anyhow::Result<i64> {
        let conn = self.connect()?;
        let count = conn.query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{reading, temp_db};
    use crate::{Database, MeasurementStore};
    use wqm_core::{DateFilter, Measurement, NewMeasurement};

    fn range(from: &str, to: &str) -> DateFilter {
        DateFilter::from_params(Some(from), Some(to)).unwrap()
    }

    fn ids(rows: &[Measurement]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    /// Helper to create a database with readings inserted out of order.
    fn sample_db() -> (tempfile::TempDir, Database, Vec<i64>) {
        let (dir, db) = temp_db();
        let inserted: Vec<i64> = [
            reading("2024-01-03", "08:00", 7.4),
            reading("2024-01-01", "12:00", 7.2),
            reading("2024-01-01", "08:00", 7.1),
            reading("2024-01-02", "08:00", 7.3),
            reading("2024-01-01", "12:00", 7.0),
        ]
        .iter()
        .map(|m| db.insert(m).unwrap())
        .collect();
        (dir, db, inserted)
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let (_dir, _db, inserted) = sample_db();
        assert!(inserted.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unbounded_query_orders_by_date_time_id() {
        let (_dir, db, inserted) = sample_db();
        let rows = db.query(&DateFilter::unbounded()).unwrap();
        assert_eq!(
            ids(&rows),
            vec![inserted[2], inserted[1], inserted[4], inserted[3], inserted[0]]
        );
        let mut resorted = rows.clone();
        resorted.sort_by(|a, b| (&a.date, &a.time, a.id).cmp(&(&b.date, &b.time, b.id)));
        assert_eq!(rows, resorted);
    }

    #[test]
    fn query_filters_inclusive_range() {
        let (_dir, db, _) = sample_db();
        let rows = db.query(&range("2024-01-02", "2024-01-03")).unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn query_with_one_open_bound() {
        let (_dir, db, _) = sample_db();
        let filter = DateFilter::from_params(None, Some("2024-01-01")).unwrap();
        let rows = db.query(&filter).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.date == "2024-01-01"));
    }

    #[test]
    fn query_empty_range() {
        let (_dir, db, _) = sample_db();
        let rows = db.query(&range("2020-01-01", "2020-12-31")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn inserted_row_is_returned_exactly_once() {
        let (_dir, db, _) = sample_db();
        let id = db.insert(&reading("2024-01-02", "09:30", 6.9)).unwrap();
        let rows = db.query(&range("2024-01-02", "2024-01-02")).unwrap();
        assert_eq!(rows.iter().filter(|r| r.id == id).count(), 1);
    }

    #[test]
    fn inserted_values_round_trip() {
        let (_dir, db) = temp_db();
        let new = NewMeasurement {
            date: "2024-05-06".to_string(),
            time: "23:59".to_string(),
            ph: 6.25,
            turbidity: 0.5,
            conductivity: 1234.5,
            temperature: -1.5,
        };
        let id = db.insert(&new).unwrap();
        let rows = db.query(&DateFilter::unbounded()).unwrap();
        assert_eq!(rows, vec![new.with_id(id)]);
    }

    #[test]
    fn delete_removes_listed_ids() {
        let (_dir, db, inserted) = sample_db();
        let removed = db.delete(&[inserted[0], inserted[2]]).unwrap();
        assert_eq!(removed, 2);

        let rows = db.query(&DateFilter::unbounded()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(!ids(&rows).contains(&inserted[0]));
        assert!(!ids(&rows).contains(&inserted[2]));
    }

    #[test]
    fn delete_unknown_or_repeated_ids_is_noop() {
        let (_dir, db, inserted) = sample_db();
        assert_eq!(db.delete(&[9999]).unwrap(), 0);
        assert_eq!(db.delete(&[]).unwrap(), 0);

        assert_eq!(db.delete(&[inserted[1], inserted[1]]).unwrap(), 1);
        assert_eq!(db.delete(&[inserted[1]]).unwrap(), 0);
        assert_eq!(db.count().unwrap(), 4);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (_dir, db, inserted) = sample_db();
        let last = *inserted.last().unwrap();
        db.delete(&[last]).unwrap();
        let next = db.insert(&reading("2024-01-04", "08:00", 7.0)).unwrap();
        assert!(next > last, "id {} should be greater than deleted id {}", next, last);
    }

    #[test]
    fn date_bounds_span_stored_rows() {
        let (_dir, db, _) = sample_db();
        let bounds = db.date_bounds().unwrap().unwrap();
        assert_eq!(bounds.first, "2024-01-01");
        assert_eq!(bounds.last, "2024-01-03");
    }

    #[test]
    fn insert_then_delete_scenario() {
        let (_dir, db) = temp_db();
        let first = db
            .insert(&NewMeasurement {
                date: "2024-01-01".to_string(),
                time: "08:00".to_string(),
                ph: 7.1,
                turbidity: 2.0,
                conductivity: 300.0,
                temperature: 18.0,
            })
            .unwrap();
        let second = db
            .insert(&NewMeasurement {
                date: "2024-01-02".to_string(),
                time: "08:00".to_string(),
                ph: 7.3,
                turbidity: 3.0,
                conductivity: 310.0,
                temperature: 19.0,
            })
            .unwrap();

        let filter = range("2024-01-01", "2024-01-02");
        assert_eq!(ids(&db.query(&filter).unwrap()), vec![first, second]);

        db.delete(&[first]).unwrap();
        assert_eq!(ids(&db.query(&filter).unwrap()), vec![second]);
    }
}
