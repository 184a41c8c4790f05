//! Raw form input for a new measurement and its validation.
//!
//! A submission with any blank field is *incomplete*: nothing is written and
//! the caller keeps its current view, reporting which fields were missing.
//! A complete submission with a malformed value is rejected outright.

use crate::error::{Result, ValidationError};
use crate::measurement::NewMeasurement;
use crate::{DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// The six user-editable fields, exactly as received.
///
/// Numeric fields also deserialize from JSON numbers; they are kept as text
/// so that every input path goes through the same checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub ph: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub turbidity: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub conductivity: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub temperature: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(n) => n.to_string(),
        }),
    )
}

/// Result of checking a submission that contained no malformed values.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionCheck {
    Complete(NewMeasurement),
    Incomplete { missing: Vec<&'static str> },
}

impl Submission {
    /// Names of the fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect()
    }

    /// Validate the submission.
    ///
    /// Missing fields win over malformed ones: a half-filled form is never an
    /// error, it just has not been submitted yet.
    pub fn check(&self) -> Result<SubmissionCheck> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            log::debug!("[WQM] submission: incomplete, missing {:?}", missing);
            return Ok(SubmissionCheck::Incomplete { missing });
        }

        let measurement = NewMeasurement {
            date: normalize_date(field(&self.date))?,
            time: normalize_time(field(&self.time))?,
            ph: parse_number("ph", field(&self.ph))?,
            turbidity: parse_number("turbidity", field(&self.turbidity))?,
            conductivity: parse_number("conductivity", field(&self.conductivity))?,
            temperature: parse_number("temperature", field(&self.temperature))?,
        };
        Ok(SubmissionCheck::Complete(measurement))
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("date", self.date.as_deref()),
            ("time", self.time.as_deref()),
            ("ph", self.ph.as_deref()),
            ("turbidity", self.turbidity.as_deref()),
            ("conductivity", self.conductivity.as_deref()),
            ("temperature", self.temperature.as_deref()),
        ]
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("").trim()
}

/// Parse `YYYY-MM-DD` and re-emit it zero padded.
pub fn normalize_date(raw: &str) -> Result<String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| ValidationError::InvalidDate {
            field: "date",
            value: raw.to_string(),
        })
}

/// Parse `HH:MM` (seconds tolerated and dropped) and re-emit it as `HH:MM`.
pub fn normalize_time(raw: &str) -> Result<String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(|t| t.format(TIME_FORMAT).to_string())
        .map_err(|_| ValidationError::InvalidTime {
            field: "time",
            value: raw.to_string(),
        })
}

/// Parse a finite number.
///
/// A single comma is accepted as the decimal separator. Input mixing `,`
/// and `.`, with several commas, or with a comma followed by exactly three
/// digits (`1,200`) is ambiguous with digit grouping and rejected.
pub fn parse_number(name: &'static str, raw: &str) -> Result<f64> {
    let invalid = || ValidationError::InvalidNumber {
        field: name,
        value: raw.to_string(),
    };
    let text = raw.trim();
    let normalized = match text.split_once(',') {
        None => text.to_string(),
        Some((whole, fraction)) => {
            let grouped = fraction.len() == 3 && fraction.bytes().all(|b| b.is_ascii_digit());
            if whole.contains('.') || fraction.contains(|c| c == '.' || c == ',') || grouped {
                return Err(invalid());
            }
            format!("{whole}.{fraction}")
        }
    };
    let value: f64 = normalized.parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}
