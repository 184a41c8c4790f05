//! Chart series construction for water quality measurements.
//!
//! This crate turns ordered measurement rows into the per-metric series the
//! dashboard charts draw. Everything here is pure: no I/O, no failure modes.

/// Primary and reference-band series for one metric.
pub mod series {
    use serde::Serialize;
    use wqm_core::{Measurement, Metric};

    /// A constant threshold drawn as a flat dashed line.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct ReferenceBand {
        pub label: String,
        pub value: f64,
    }

    impl ReferenceBand {
        pub fn new(label: impl Into<String>, value: f64) -> Self {
            Self {
                label: label.into(),
                value,
            }
        }
    }

    /// How a series should be drawn.
    #[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum SeriesKind {
        /// Solid line through the measured values
        Primary,
        /// Dashed horizontal reference line
        Reference,
    }

    /// Parallel x / y vectors, the shape chart libraries expect.
    ///
    /// `y` values are passed through untouched; a non-finite value
    /// serializes as JSON `null` and shows up as a gap in the line.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct Series {
        pub name: String,
        pub kind: SeriesKind,
        pub x: Vec<String>,
        pub y: Vec<f64>,
    }

    impl Series {
        pub fn len(&self) -> usize {
            self.x.len()
        }

        pub fn is_empty(&self) -> bool {
            self.x.is_empty()
        }
    }

    /// Everything one chart needs.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct ChartSeries {
        pub metric: Metric,
        pub title: String,
        pub unit: String,
        pub primary: Series,
        pub bands: Vec<Series>,
    }

    /// Build the chart series for `metric`.
    ///
    /// `rows` must already be in chart order; they are not re-sorted. The x
    /// value of each point is `"{date} {time}"`. Each band becomes a series
    /// sharing the primary x values with its constant repeated as y.
    pub fn build(rows: &[Measurement], metric: Metric, bands: &[ReferenceBand]) -> ChartSeries {
        let x: Vec<String> = rows.iter().map(Measurement::timestamp_label).collect();
        let y: Vec<f64> = rows.iter().map(|row| metric.value_of(row)).collect();

        let band_series = bands
            .iter()
            .map(|band| Series {
                name: band.label.clone(),
                kind: SeriesKind::Reference,
                x: x.clone(),
                y: vec![band.value; x.len()],
            })
            .collect();

        log::debug!(
            "[WQM] series: built {} with {} points and {} bands",
            metric,
            x.len(),
            bands.len()
        );

        ChartSeries {
            metric,
            title: metric.title().to_string(),
            unit: metric.unit().to_string(),
            primary: Series {
                name: metric.label().to_string(),
                kind: SeriesKind::Primary,
                x,
                y,
            },
            bands: band_series,
        }
    }

}

/// Default acceptable-range thresholds per metric.
pub mod bands {
    use crate::series::ReferenceBand;
    use wqm_core::Metric;

    /// Lower and upper pH limits for drinking water.
    pub const PH_MIN: f64 = 6.5;
    pub const PH_MAX: f64 = 9.0;
    /// Upper turbidity limit, NTU.
    pub const TURBIDITY_MAX: f64 = 2.0;
    /// Upper conductivity limit, µS/cm.
    pub const CONDUCTIVITY_MAX: f64 = 1000.0;

    /// Reference bands overlaid on each metric's chart.
    ///
    /// Temperature has no regulatory limit and gets none.
    pub fn default_bands(metric: Metric) -> Vec<ReferenceBand> {
        match metric {
            Metric::Ph => vec![
                ReferenceBand::new("pH min", PH_MIN),
                ReferenceBand::new("pH max", PH_MAX),
            ],
            Metric::Turbidity => vec![ReferenceBand::new("Turbidity max", TURBIDITY_MAX)],
            Metric::Conductivity => vec![ReferenceBand::new("Conductivity max", CONDUCTIVITY_MAX)],
            Metric::Temperature => Vec::new(),
        }
    }

}

pub use bands::default_bands;
pub use series::{build, ChartSeries, ReferenceBand, Series, SeriesKind};
