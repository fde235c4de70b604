//! Page state: control group visibility and the custom range inputs

/// Visibility of the two control groups plus the raw custom inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub predefined_visible: bool,
    pub custom_range_visible: bool,
    /// Value of the `start_date` input
    pub start_input: String,
    /// Value of the `end_date` input
    pub end_input: String,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            predefined_visible: true,
            custom_range_visible: false,
            start_input: String::new(),
            end_input: String::new(),
        }
    }
}

impl PageState {
    pub fn show_custom_group(&mut self) {
        self.custom_range_visible = true;
        self.predefined_visible = false;
    }

    pub fn show_predefined_group(&mut self) {
        self.custom_range_visible = false;
        self.predefined_visible = true;
    }
}
