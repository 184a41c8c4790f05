//! The read-modify-read cycle behind every dashboard action.
//!
//! Each action writes (or not) to the store and then reads the filtered rows
//! back, returning either a fresh [`View`] or an explicit
//! [`Outcome::Unchanged`] telling the caller to keep what it shows.

use serde::Serialize;
use wqm_core::{DateFilter, Measurement, Metric, Submission, SubmissionCheck};
use wqm_data::{build, default_bands, ChartSeries};
use wqm_db::{DateBounds, MeasurementStore};

/// Everything the dashboard renders for one date filter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct View {
    pub filter: DateFilter,
    /// Full extent of stored data, for the date pickers.
    pub bounds: Option<DateBounds>,
    pub rows: Vec<Measurement>,
    /// One chart per metric, in [`Metric::ALL`] order.
    pub charts: Vec<ChartSeries>,
}

impl View {
    pub fn new(filter: DateFilter, bounds: Option<DateBounds>, rows: Vec<Measurement>) -> Self {
        let charts = Metric::ALL
            .iter()
            .map(|&metric| build(&rows, metric, &default_bands(metric)))
            .collect();
        Self {
            filter,
            bounds,
            rows,
            charts,
        }
    }
}

/// What a write did to the store.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Change {
    Inserted { id: i64 },
    Deleted { removed: usize },
}

/// Result of a dashboard action.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    /// The store changed; re-render with `view`.
    Changed { change: Change, view: View },
    /// Nothing was written; keep the current view.
    Unchanged { notice: String },
}

/// Dashboard actions over a measurement store.
#[derive(Debug, Clone)]
pub struct Dashboard<S> {
    store: S,
}

impl<S: MeasurementStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current rows and charts for `filter`.
    pub fn refresh(&self, filter: &DateFilter) -> anyhow::Result<View> {
        let rows = self.store.query(filter)?;
        let bounds = self.store.date_bounds()?;
        Ok(View::new(*filter, bounds, rows))
    }

    /// Chart series for a single metric.
    pub fn series(&self, metric: Metric, filter: &DateFilter) -> anyhow::Result<ChartSeries> {
        let rows = self.store.query(filter)?;
        Ok(build(&rows, metric, &default_bands(metric)))
    }

    /// Insert a submitted measurement, then read back.
    ///
    /// An incomplete form leaves the store untouched and yields
    /// [`Outcome::Unchanged`]. Malformed values are an error
    /// (a [`wqm_core::ValidationError`] inside the `anyhow::Error`).
    pub fn submit(&self, submission: &Submission, filter: &DateFilter) -> anyhow::Result<Outcome> {
        let measurement = match submission.check()? {
            SubmissionCheck::Complete(m) => m,
            SubmissionCheck::Incomplete { missing } => {
                log::info!("[WQM] dashboard: submission incomplete, missing {:?}", missing);
                return Ok(Outcome::Unchanged {
                    notice: format!("Missing fields: {}", missing.join(", ")),
                });
            }
        };
        let id = self.store.insert(&measurement)?;
        Ok(Outcome::Changed {
            change: Change::Inserted { id },
            view: self.refresh(filter)?,
        })
    }

    /// Delete the selected ids, then read back.
    pub fn delete_selected(&self, ids: &[i64], filter: &DateFilter) -> anyhow::Result<Outcome> {
        if ids.is_empty() {
            return Ok(Outcome::Unchanged {
                notice: "No measurements selected".to_string(),
            });
        }
        let removed = self.store.delete(ids)?;
        if removed == 0 {
            return Ok(Outcome::Unchanged {
                notice: "No matching measurements to delete".to_string(),
            });
        }
        Ok(Outcome::Changed {
            change: Change::Deleted { removed },
            view: self.refresh(filter)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;
    use wqm_core::ValidationError;
    use wqm_data::SeriesKind;
    use wqm_db::Database;

    pub(crate) fn temp_dashboard() -> (TempDir, Dashboard<Database>) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("agua.db")).unwrap();
        (dir, Dashboard::new(db))
    }

    pub(crate) fn submission(values: [&str; 6]) -> Submission {
        let [date, time, ph, turbidity, conductivity, temperature] = values.map(|v| Some(v.to_string()));
        Submission {
            date,
            time,
            ph,
            turbidity,
            conductivity,
            temperature,
        }
    }

    fn inserted_id(outcome: &Outcome) -> i64 {
        match outcome {
            Outcome::Changed {
                change: Change::Inserted { id },
                ..
            } => *id,
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn end_to_end_insert_query_build_delete() {
        let (_dir, dashboard) = temp_dashboard();
        let filter = DateFilter::from_params(Some("2024-01-01"), Some("2024-01-02")).unwrap();

        let first = dashboard
            .submit(&submission(["2024-01-01", "08:00", "7.1", "2", "300", "18"]), &filter)
            .unwrap();
        let second = dashboard
            .submit(&submission(["2024-01-02", "08:00", "7.3", "3", "310", "19"]), &filter)
            .unwrap();
        let first_id = inserted_id(&first);
        let second_id = inserted_id(&second);

        let view = dashboard.refresh(&filter).unwrap();
        let ids: Vec<i64> = view.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first_id, second_id]);

        let ph = build(&view.rows, Metric::Ph, &[]);
        assert_eq!(ph.primary.x, vec!["2024-01-01 08:00", "2024-01-02 08:00"]);
        assert_eq!(ph.primary.y, vec![7.1, 7.3]);

        let outcome = dashboard.delete_selected(&[first_id], &filter).unwrap();
        match outcome {
            Outcome::Changed { change, view } => {
                assert_eq!(change, Change::Deleted { removed: 1 });
                let ids: Vec<i64> = view.rows.iter().map(|r| r.id).collect();
                assert_eq!(ids, vec![second_id]);
            }
            other => panic!("expected delete, got {:?}", other),
        }
    }

    #[test]
    fn incomplete_submission_leaves_store_unchanged() {
        let (_dir, dashboard) = temp_dashboard();
        let mut s = submission(["2024-01-01", "08:00", "7.1", "2", "300", "18"]);
        s.ph = None;
        let outcome = dashboard.submit(&s, &DateFilter::unbounded()).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unchanged {
                notice: "Missing fields: ph".to_string()
            }
        );
        assert!(dashboard.refresh(&DateFilter::unbounded()).unwrap().rows.is_empty());
    }

    #[test]
    fn malformed_submission_is_a_validation_error() {
        let (_dir, dashboard) = temp_dashboard();
        let s = submission(["2024-01-01", "08:00", "seven", "2", "300", "18"]);
        let err = dashboard.submit(&s, &DateFilter::unbounded()).unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
        assert!(dashboard.refresh(&DateFilter::unbounded()).unwrap().rows.is_empty());
    }

    #[test]
    fn delete_with_empty_or_unknown_selection_is_unchanged() {
        let (_dir, dashboard) = temp_dashboard();
        let filter = DateFilter::unbounded();
        assert!(matches!(
            dashboard.delete_selected(&[], &filter).unwrap(),
            Outcome::Unchanged { .. }
        ));
        assert!(matches!(
            dashboard.delete_selected(&[42], &filter).unwrap(),
            Outcome::Unchanged { .. }
        ));
    }

    #[test]
    fn view_has_chart_per_metric_with_default_bands() {
        let (_dir, dashboard) = temp_dashboard();
        let filter = DateFilter::unbounded();
        for (i, date) in ["2024-01-01", "2024-01-02", "2024-01-03"].into_iter().enumerate() {
            let ph = format!("7.{}", i);
            dashboard
                .submit(&submission([date, "08:00", ph.as_str(), "1", "200", "15"]), &filter)
                .unwrap();
        }

        let view = dashboard.refresh(&filter).unwrap();
        assert_eq!(view.charts.len(), 4);
        let bounds = view.bounds.clone().unwrap();
        assert_eq!(bounds.first, "2024-01-01");
        assert_eq!(bounds.last, "2024-01-03");

        let ph = &view.charts[0];
        assert_eq!(ph.metric, Metric::Ph);
        assert_eq!(ph.primary.len(), 3);
        assert_eq!(ph.bands.len(), 2);
        assert!(ph.bands.iter().all(|b| b.kind == SeriesKind::Reference && b.len() == 3));
        assert_eq!(view.charts[3].metric, Metric::Temperature);
        assert!(view.charts[3].bands.is_empty());
    }

    #[test]
    fn series_respects_filter() {
        let (_dir, dashboard) = temp_dashboard();
        let all = DateFilter::unbounded();
        dashboard
            .submit(&submission(["2024-01-01", "08:00", "7.1", "2", "300", "18"]), &all)
            .unwrap();
        dashboard
            .submit(&submission(["2024-02-01", "08:00", "7.3", "3", "310", "19"]), &all)
            .unwrap();

        let feb = DateFilter::from_params(Some("2024-02-01"), None).unwrap();
        let chart = dashboard.series(Metric::Conductivity, &feb).unwrap();
        assert_eq!(chart.primary.y, vec![310.0]);
        assert_eq!(chart.bands.len(), 1);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = Outcome::Unchanged {
            notice: "No measurements selected".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "unchanged");
        assert_eq!(json["notice"], "No measurements selected");
    }
}
