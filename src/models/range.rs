//! Date range models

use std::fmt;

use chrono::NaiveDate;

use crate::utils::{format_date, INVALID_DATE_TOKEN};

/// Predefined look-back windows ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Week,
    Month,
    Quarter,
    Year,
}

impl RangePreset {
    /// Number of days subtracted from today for the start date
    pub fn days(self) -> i64 {
        match self {
            RangePreset::Week => 7,
            RangePreset::Month => 30,
            RangePreset::Quarter => 90,
            RangePreset::Year => 365,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RangePreset::Week => "week",
            RangePreset::Month => "month",
            RangePreset::Quarter => "quarter",
            RangePreset::Year => "year",
        }
    }
}

/// A calendar date as selected by the user, possibly unparseable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Date(NaiveDate),
    /// Raw input that could not be parsed
    Invalid(String),
}

impl DateValue {
    /// The `MM-DD-YYYY` token, or `Invalid Date`
    pub fn token(&self) -> String {
        match self {
            DateValue::Date(date) => format_date(*date),
            DateValue::Invalid(_) => INVALID_DATE_TOKEN.to_string(),
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

/// Selected start/end pair. `start <= end` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateValue,
    pub end: DateValue,
}

impl DateRange {
    pub fn new(start: impl Into<DateValue>, end: impl Into<DateValue>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start and end tokens, in that order
    pub fn tokens(&self) -> (String, String) {
        (self.start.token(), self.end.token())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start.token(), self.end.token())
    }
}
