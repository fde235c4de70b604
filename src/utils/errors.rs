use thiserror::Error;

use crate::api::rates::ApiError;

/// Errors raised while redrawing the chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Rates request failed: {0}")]
    Api(#[from] ApiError),
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Surface I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set in environment or .env file")]
    Missing(&'static str),
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}
