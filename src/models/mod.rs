//! Data models shared by the controller and services

pub mod range;
pub mod chart;
pub mod page;

pub use range::{DateRange, DateValue, RangePreset};
pub use chart::{ChartHandle, ChartSpec, Rgba};
pub use page::PageState;
