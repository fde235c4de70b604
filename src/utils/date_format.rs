use chrono::{DateTime, NaiveDate};

/// Token produced for a date that could not be parsed
pub const INVALID_DATE_TOKEN: &str = "Invalid Date";

/// Format string for the `MM-DD-YYYY` tokens sent to the rates endpoint
pub const TOKEN_FORMAT: &str = "%m-%d-%Y";

/// Formats accepted from the custom range inputs, tried in order
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%m-%d-%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Format a calendar date as `MM-DD-YYYY` (month and day zero-padded)
pub fn format_date(date: NaiveDate) -> String {
    date.format(TOKEN_FORMAT).to_string()
}

/// Parse a `MM-DD-YYYY` token back into a date
pub fn parse_token(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token.trim(), TOKEN_FORMAT).ok()
}

/// Parse a raw custom-range input value
///
/// Accepts the value of an HTML date input (`YYYY-MM-DD`), the token format
/// itself, slash-separated variants, and RFC 3339 timestamps (date part only).
/// Returns `None` for anything else.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for format in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "03-05-2024");
    }

    #[test]
    fn test_format_two_digit_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(format_date(date), "12-31-2023");
    }

    #[test]
    fn test_format_pads_year_to_four_digits() {
        let date = NaiveDate::from_ymd_opt(987, 1, 2).unwrap();
        assert_eq!(format_date(date), "01-02-0987");
    }

    #[test]
    fn test_parse_html_date_input() {
        assert_eq!(
            parse_date_input("2024-03-05"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn test_parse_alternate_inputs() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date_input("03-05-2024"), expected);
        assert_eq!(parse_date_input("03/05/2024"), expected);
        assert_eq!(parse_date_input("2024/03/05"), expected);
        assert_eq!(parse_date_input(" 2024-03-05T10:30:00+00:00 "), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("yesterday"), None);
        assert_eq!(parse_date_input("2024-13-40"), None);
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token("03-04-2024"), NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(parse_token("2024-03-04"), None);
    }
}
