use serde::Deserialize;
use thiserror::Error;

/// One element of the rates endpoint's JSON array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatePoint {
    /// Day label in `MM-DD-YYYY` form
    pub date: String,
    pub rate: f64,
}

/// Errors returned by the rates client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body is not a JSON array
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// An element is missing `date` or `rate`, or has the wrong type
    #[error("Decode Error at element {index}: {message}")]
    DecodeError { index: usize, message: String },
}

/// Decode a response body into rate points, keeping server order
pub fn decode_rate_points(body: &str) -> Result<Vec<RatePoint>, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

    let elements = match value {
        serde_json::Value::Array(elements) => elements,
        other => {
            return Err(ApiError::DeserializationError(format!(
                "Expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<RatePoint>(element).map_err(|e| ApiError::DecodeError {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
