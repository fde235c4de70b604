pub mod client;
pub mod models;

pub use client::{RateSource, RatesClient};
pub use models::{ApiError, RatePoint};
