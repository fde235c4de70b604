//! Chart generation models

use chrono::NaiveDate;

use crate::utils::date_format::TOKEN_FORMAT;

pub const DATASET_LABEL: &str = "Interbank Rate";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Rate";

/// RGBA color with alpha in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// rgba(255, 99, 132, 0.2)
pub const TRANSLUCENT_RED: Rgba = Rgba::new(255, 99, 132, 0.2);
/// rgba(255, 99, 132, 1)
pub const OPAQUE_RED: Rgba = Rgba::new(255, 99, 132, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    /// chrono format the labels are parsed with
    pub parser: &'static str,
    pub unit: TimeUnit,
    /// chrono format for tick labels
    pub tick_format: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub title: &'static str,
}

/// The single line dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    pub fill: bool,
    pub background_color: Rgba,
    pub border_color: Rgba,
    pub border_width: u32,
}

/// Everything needed to draw one chart. `labels[i]` belongs to `dataset.data[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub dataset: Dataset,
    pub x_axis: TimeAxis,
    pub y_axis: ValueAxis,
    pub responsive: bool,
    /// Dates the data was requested for, used as the x range when no label parses
    pub requested_window: Option<(NaiveDate, NaiveDate)>,
}

impl ChartSpec {
    /// Line chart with the fixed interbank styling
    pub fn line(
        labels: Vec<String>,
        data: Vec<f64>,
        requested_window: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        Self {
            labels,
            dataset: Dataset {
                label: DATASET_LABEL,
                data,
                fill: false,
                background_color: TRANSLUCENT_RED,
                border_color: OPAQUE_RED,
                border_width: 1,
            },
            x_axis: TimeAxis {
                parser: TOKEN_FORMAT,
                unit: TimeUnit::Day,
                tick_format: "%b %-d",
                title: X_AXIS_TITLE,
            },
            y_axis: ValueAxis { title: Y_AXIS_TITLE },
            responsive: true,
            requested_window,
        }
    }
}

/// The live chart bound to a drawing surface
#[derive(Debug, Clone)]
pub struct ChartHandle {
    /// Surface generation the chart was drawn into
    pub generation: u64,
    /// Render ticket that produced it
    pub ticket: u64,
    pub url: String,
    pub spec: ChartSpec,
}
