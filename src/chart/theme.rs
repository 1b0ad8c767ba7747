// Chart theme - fonts, colours and empty-state text
use crate::domain::chart::Color;

#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub grid_line: Color,
    pub axis_label: Color,
    pub axis_label_muted: Color,
    pub legend_label: Color,
    pub value_text: Color,
    pub gauge_track: Color,
    pub gauge_center: Color,
    pub axis_label_size: f64,
    pub legend_label_size: f64,
    /// Text shown in the empty state.
    pub empty_message: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            grid_line: Color::GRAY,
            axis_label: Color::LABEL,
            axis_label_muted: Color::MUTED,
            legend_label: Color::LABEL,
            value_text: Color::INK,
            gauge_track: Color::GRAY,
            gauge_center: Color::WHITE,
            axis_label_size: 10.0,
            legend_label_size: 12.0,
            empty_message: "No historical data".to_string(),
        }
    }
}

impl ChartTheme {
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}
