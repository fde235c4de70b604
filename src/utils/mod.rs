pub mod date_format;
pub mod url_template;
pub mod errors;

pub use date_format::{format_date, parse_date_input, parse_token, INVALID_DATE_TOKEN};
pub use errors::{ChartError, ConfigError};
