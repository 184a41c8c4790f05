//! Record-level subcommands: insert, delete, list and series.
//!
//! These reuse [`Dashboard`] so the command line behaves exactly like the
//! web form: an incomplete insert is reported and skipped, malformed values
//! fail the command.

use crate::dashboard::{Change, Dashboard, Outcome};
use log::info;
use wqm_core::{DateFilter, Measurement, Metric, Submission};
use wqm_db::Database;

/// Insert one measurement from command-line fields.
pub fn run_insert(db: Database, submission: &Submission) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(db);
    match dashboard.submit(submission, &DateFilter::unbounded())? {
        Outcome::Changed {
            change: Change::Inserted { id },
            view,
        } => {
            println!("Inserted measurement {}", id);
            info!("[WQM] insert: store now holds {} measurements", view.rows.len());
        }
        Outcome::Changed { .. } => {}
        Outcome::Unchanged { notice } => println!("Nothing inserted: {}", notice),
    }
    Ok(())
}

/// Delete measurements by id.
pub fn run_delete(db: Database, ids: &[i64]) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(db);
    match dashboard.delete_selected(ids, &DateFilter::unbounded())? {
        Outcome::Changed {
            change: Change::Deleted { removed },
            ..
        } => println!("Deleted {} measurement(s)", removed),
        Outcome::Changed { .. } => {}
        Outcome::Unchanged { notice } => println!("Nothing deleted: {}", notice),
    }
    Ok(())
}

/// Print the filtered measurements as a table, or as JSON.
pub fn run_list(db: Database, filter: &DateFilter, json: bool) -> anyhow::Result<()> {
    let view = Dashboard::new(db).refresh(filter)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view.rows)?);
    } else {
        print!("{}", format_table(&view.rows));
    }
    Ok(())
}

/// Print one metric's chart series as JSON.
pub fn run_series(db: Database, metric: Metric, filter: &DateFilter) -> anyhow::Result<()> {
    let chart = Dashboard::new(db).series(metric, filter)?;
    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}

fn format_table(rows: &[Measurement]) -> String {
    let mut out = format!(
        "{:>6}  {:<10}  {:<5}  {:>6}  {:>9}  {:>12}  {:>11}\n",
        "ID", "Date", "Time", "pH", "Turbidity", "Conductivity", "Temperature"
    );
    for r in rows {
        out.push_str(&format!(
            "{:>6}  {:<10}  {:<5}  {:>6}  {:>9}  {:>12}  {:>11}\n",
            r.id, r.date, r.time, r.ph, r.turbidity, r.conductivity, r.temperature
        ));
    }
    out
}
