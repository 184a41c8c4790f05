use crate::error::ValidationError;
use crate::measurement::Measurement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four quantities sampled per measurement.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Ph,
    Turbidity,
    Conductivity,
    Temperature,
}

impl Metric {
    /// Every metric, in dashboard display order.
    pub const ALL: [Metric; 4] = [
        Metric::Ph,
        Metric::Turbidity,
        Metric::Conductivity,
        Metric::Temperature,
    ];

    /// Read this metric's value from a row.
    pub fn value_of(&self, row: &Measurement) -> f64 {
        match self {
            Metric::Ph => row.ph,
            Metric::Turbidity => row.turbidity,
            Metric::Conductivity => row.conductivity,
            Metric::Temperature => row.temperature,
        }
    }

    /// Short label used as the primary series name.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ph => "pH",
            Metric::Turbidity => "Turbidity",
            Metric::Conductivity => "Conductivity",
            Metric::Temperature => "Temperature",
        }
    }

    /// Measurement unit, empty for dimensionless pH.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Ph => "",
            Metric::Turbidity => "NTU",
            Metric::Conductivity => "µS/cm",
            Metric::Temperature => "°C",
        }
    }

    /// Chart heading.
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Ph => "Water pH Level",
            Metric::Turbidity => "Water Turbidity",
            Metric::Conductivity => "Water Conductivity",
            Metric::Temperature => "Water Temperature",
        }
    }

    /// Column name in the `measurements` table.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Ph => "ph",
            Metric::Turbidity => "turbidity",
            Metric::Conductivity => "conductivity",
            Metric::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ph" => Ok(Metric::Ph),
            "turbidity" | "turbidez" => Ok(Metric::Turbidity),
            "conductivity" | "conductividad" => Ok(Metric::Conductivity),
            "temperature" | "temperatura" => Ok(Metric::Temperature),
            _ => Err(ValidationError::UnknownMetric(s.to_string())),
        }
    }
}
