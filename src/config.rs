use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::services::chart_service::DEFAULT_SURFACE_SIZE;
use crate::utils::url_template;
use crate::utils::ConfigError;

/// Runtime settings read once from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// URL template holding the `start_date` and `end_date` placeholders
    pub base_url: String,
    /// File standing in for the drawing surface
    pub chart_output: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    /// `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("RATES_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("RATES_BASE_URL"))?;

        if !url_template::has_placeholders(&base_url) {
            warn!(
                "RATES_BASE_URL '{}' is missing a start_date or end_date placeholder",
                base_url
            );
        }

        let chart_output = lookup("CHART_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("graph.png"));

        let chart_width = parse_dimension(&lookup, "CHART_WIDTH")?.unwrap_or(DEFAULT_SURFACE_SIZE.0);
        let chart_height = parse_dimension(&lookup, "CHART_HEIGHT")?.unwrap_or(DEFAULT_SURFACE_SIZE.1);

        let request_timeout = parse_var::<u64, _>(&lookup, "RATES_TIMEOUT_SECS")?
            .map(Duration::from_secs);

        Ok(Self {
            base_url,
            chart_output,
            chart_width,
            chart_height,
            request_timeout,
        })
    }
}

/// A surface side in pixels; zero is rejected
fn parse_dimension<F>(lookup: &F, name: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<u32, _>(lookup, name)? {
        Some(0) => Err(ConfigError::Invalid {
            name,
            value: lookup(name).unwrap_or_default(),
        }),
        other => Ok(other),
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
