use serde::{Deserialize, Serialize};

/// A stored water quality reading.
///
/// `date` is `YYYY-MM-DD` and `time` is `HH:MM`, so lexicographic order of
/// the pair matches chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub ph: f64,
    pub turbidity: f64,
    pub conductivity: f64,
    pub temperature: f64,
}

impl Measurement {
    /// Display timestamp used as the chart x value.
    pub fn timestamp_label(&self) -> String {
        format!("{} {}", self.date, self.time)
    }
}

/// A validated reading that has not been assigned an id yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMeasurement {
    pub date: String,
    pub time: String,
    pub ph: f64,
    pub turbidity: f64,
    pub conductivity: f64,
    pub temperature: f64,
}

impl NewMeasurement {
    /// Attach the id assigned by the store.
    pub fn with_id(self, id: i64) -> Measurement {
        Measurement {
            id,
            date: self.date,
            time: self.time,
            ph: self.ph,
            turbidity: self.turbidity,
            conductivity: self.conductivity,
            temperature: self.temperature,
        }
    }
}
