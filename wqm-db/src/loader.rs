//! CSV interchange for measurements.
//!
//! # CSV Format
//!
//! Header row required, columns in this order:
//!
//! ```text
//! Fecha,Hora,pH,Turbidez,Conductividad,Temperatura
//! 2024-01-01,08:00,7.1,2,300,18
//! ```
//!
//! Ids are not part of the file; importing assigns fresh ids in file order.

use crate::models::ImportReport;
use crate::Database;
use rusqlite::params;
use wqm_core::{Measurement, Submission, SubmissionCheck};

/// Column headers of the interchange file.
pub const CSV_HEADER: [&str; 6] = [
    "Fecha",
    "Hora",
    "pH",
    "Turbidez",
    "Conductividad",
    "Temperatura",
];

impl Database {
    /// Load measurements from a CSV string in a single transaction.
    ///
    /// Rows with a blank or malformed field are skipped and counted; a
    /// structurally broken file (e.g. bad quoting) aborts the whole import.
    pub fn import_csv(&self, csv_data: &str) -> anyhow::Result<ImportReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let mut report = ImportReport::default();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO measurements (date, time, ph, turbidity, conductivity, temperature)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (line, result) in rdr.records().enumerate() {
                let r = result?;
                let submission = Submission {
                    date: r.get(0).map(str::to_string),
                    time: r.get(1).map(str::to_string),
                    ph: r.get(2).map(str::to_string),
                    turbidity: r.get(3).map(str::to_string),
                    conductivity: r.get(4).map(str::to_string),
                    temperature: r.get(5).map(str::to_string),
                };
                let m = match submission.check() {
                    Ok(SubmissionCheck::Complete(m)) => m,
                    Ok(SubmissionCheck::Incomplete { missing }) => {
                        log::warn!("[WQM] loader: row {} missing {:?}, skipped", line + 2, missing);
                        report.skipped += 1;
                        continue;
                    }
                    Err(e) => {
                        log::warn!("[WQM] loader: row {} skipped: {}", line + 2, e);
                        report.skipped += 1;
                        continue;
                    }
                };
                stmt.execute(params![
                    m.date,
                    m.time,
                    m.ph,
                    m.turbidity,
                    m.conductivity,
                    m.temperature
                ])?;
                report.inserted.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;
        log::info!(
            "[WQM] loader: imported {} measurements, skipped {}",
            report.inserted.len(),
            report.skipped
        );
        Ok(report)
    }
}

/// Write measurements as CSV with the interchange header.
pub fn export_csv(rows: &[Measurement]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.date.clone(),
            row.time.clone(),
            row.ph.to_string(),
            row.turbidity.to_string(),
            row.conductivity.to_string(),
            row.temperature.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}
