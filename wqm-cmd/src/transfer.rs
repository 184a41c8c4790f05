//! CSV import and export subcommands.

use anyhow::Context;
use log::info;
use std::path::Path;
use wqm_core::DateFilter;
use wqm_db::{export_csv, Database, ImportReport, MeasurementStore};

/// Import a `Fecha,Hora,...` CSV file into the store.
pub fn run_import(db: &Database, csv_path: &Path) -> anyhow::Result<ImportReport> {
    let data = std::fs::read_to_string(csv_path)
        .with_context(|| format!("{} not found", csv_path.display()))?;
    let report = db.import_csv(&data)?;
    info!(
        "[WQM] import: imported {} measurements from {} ({} skipped)",
        report.inserted.len(),
        csv_path.display(),
        report.skipped
    );
    Ok(report)
}

/// Import `csv_path` only when the store has no rows yet.
///
/// Returns `None` when the store already had data.
pub fn seed_if_empty(db: &Database, csv_path: &Path) -> anyhow::Result<Option<ImportReport>> {
    if db.count()? > 0 {
        info!("[WQM] import: store already populated, not seeding from {}", csv_path.display());
        return Ok(None);
    }
    run_import(db, csv_path).map(Some)
}

/// Export the filtered measurements. Writes to stdout when `output` is `None`.
pub fn run_export(db: &Database, filter: &DateFilter, output: Option<&Path>) -> anyhow::Result<()> {
    let rows = db.query(filter)?;
    let csv = export_csv(&rows)?;
    match output {
        Some(path) => {
            std::fs::write(path, &csv)?;
            info!("[WQM] export: wrote {} measurements to {}", rows.len(), path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Fecha,Hora,pH,Turbidez,Conductividad,Temperatura
2024-01-01,08:00,7.1,2,300,18
2024-01-02,08:00,7.3,3,310,19
";

    fn temp_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("agua.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn import_then_export_file() {
        let (dir, db) = temp_db();
        let input = dir.path().join("datos_agua.csv");
        std::fs::write(&input, CSV).unwrap();

        let report = run_import(&db, &input).unwrap();
        assert_eq!(report.inserted.len(), 2);

        let output = dir.path().join("out.csv");
        let filter = DateFilter::from_params(Some("2024-01-02"), None).unwrap();
        run_export(&db, &filter, Some(&output)).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "Fecha,Hora,pH,Turbidez,Conductividad,Temperatura\n2024-01-02,08:00,7.3,3,310,19\n"
        );
    }

    #[test]
    fn import_missing_file_fails() {
        let (dir, db) = temp_db();
        let missing = dir.path().join("nope.csv");
        let err = run_import(&db, &missing).unwrap_err();
        assert_eq!(err.to_string(), format!("{} not found", missing.display()));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
        assert_eq!(db.count().unwrap(), 0);
    }

    #[test]
    fn seed_only_fills_empty_store() {
        let (dir, db) = temp_db();
        let input = dir.path().join("datos_agua.csv");
        std::fs::write(&input, CSV).unwrap();

        assert!(seed_if_empty(&db, &input).unwrap().is_some());
        assert!(seed_if_empty(&db, &input).unwrap().is_none());
        assert_eq!(db.count().unwrap(), 2);
    }
}
