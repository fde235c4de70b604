use chrono::{Duration, Local, NaiveDate};
use tracing::debug;

use crate::models::{DateRange, DateValue, RangePreset};
use crate::utils::parse_date_input;

type Today = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Holds the currently selected range and computes new ones
pub struct RangeSelector {
    today: Today,
    current: Option<DateRange>,
}

impl RangeSelector {
    /// Selector whose "today" is the local calendar date
    pub fn new() -> Self {
        Self::with_today(|| Local::now().date_naive())
    }

    /// Selector with an injected "today" source
    pub fn with_today<F>(today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        Self {
            today: Box::new(today),
            current: None,
        }
    }

    /// Most recently selected range
    pub fn current(&self) -> Option<&DateRange> {
        self.current.as_ref()
    }

    /// today - preset days .. today
    pub fn select_preset(&mut self, preset: RangePreset) -> DateRange {
        let end = (self.today)();
        let start = end - Duration::days(preset.days());
        let range = DateRange::new(start, end);
        debug!("Selected {} range: {}", preset.name(), range);
        self.current = Some(range.clone());
        range
    }

    pub fn select_week(&mut self) -> DateRange {
        self.select_preset(RangePreset::Week)
    }

    pub fn select_month(&mut self) -> DateRange {
        self.select_preset(RangePreset::Month)
    }

    pub fn select_quarter(&mut self) -> DateRange {
        self.select_preset(RangePreset::Quarter)
    }

    pub fn select_year(&mut self) -> DateRange {
        self.select_preset(RangePreset::Year)
    }

    /// Range taken verbatim from two raw inputs. No bounds or ordering checks.
    pub fn select_custom(&mut self, start_input: &str, end_input: &str) -> DateRange {
        let range = DateRange {
            start: parse_input(start_input),
            end: parse_input(end_input),
        };
        debug!("Selected custom range: {}", range);
        self.current = Some(range.clone());
        range
    }
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_input(input: &str) -> DateValue {
    match parse_date_input(input) {
        Some(date) => DateValue::Date(date),
        None => DateValue::Invalid(input.to_string()),
    }
}
