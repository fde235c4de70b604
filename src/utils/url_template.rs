/// Placeholder replaced by the start token
pub const START_PLACEHOLDER: &str = "start_date";

/// Placeholder replaced by the end token
pub const END_PLACEHOLDER: &str = "end_date";

/// Substitute the first `start_date` and then the first `end_date` in a URL template
///
/// Only the first occurrence of each placeholder is replaced. A template
/// missing a placeholder is returned with the other one substituted.
pub fn substitute(template: &str, start_token: &str, end_token: &str) -> String {
    template
        .replacen(START_PLACEHOLDER, start_token, 1)
        .replacen(END_PLACEHOLDER, end_token, 1)
}

/// Check that both placeholders are present
pub fn has_placeholders(template: &str) -> bool {
    template.contains(START_PLACEHOLDER) && template.contains(END_PLACEHOLDER)
}
