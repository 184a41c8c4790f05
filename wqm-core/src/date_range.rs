use crate::error::{Result, ValidationError};
use crate::DATE_FORMAT;
use chrono::NaiveDate;
use serde::Serialize;

/// An inclusive date filter. A missing bound leaves that side open.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Default, Serialize)]
pub struct DateFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateFilter {
    /// No bounds; a read returns every row.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Fails if `from` is after `to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(ValidationError::InvertedRange {
                    from: f.format(DATE_FORMAT).to_string(),
                    to: t.format(DATE_FORMAT).to_string(),
                });
            }
        }
        Ok(Self { from, to })
    }

    /// Build from raw query or form parameters. Blank strings count as absent.
    pub fn from_params(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = parse_bound("from", from)?;
        let to = parse_bound("to", to)?;
        Self::new(from, to)
    }

    /// Lower bound formatted for binding against the `date` column.
    pub fn from_text(&self) -> Option<String> {
        self.from.map(|d| d.format(DATE_FORMAT).to_string())
    }

    /// Upper bound formatted for binding against the `date` column.
    pub fn to_text(&self) -> Option<String> {
        self.to.map(|d| d.format(DATE_FORMAT).to_string())
    }
}

fn parse_bound(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate {
                field,
                value: s.to_string(),
            }),
    }
}
