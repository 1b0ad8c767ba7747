// Label formatting helpers
use chrono::NaiveDateTime;

/// Time-of-day portion of a sample timestamp, used for x-axis labels.
pub fn time_of_day(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Fixed-point rendering used by tooltips, bar axis labels and gauge readouts.
pub fn decimal(value: f64, digits: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", digits, value)
    } else {
        "-".to_string()
    }
}

/// Integer label with an optional unit suffix, e.g. `60%`.
pub fn rounded(value: f64, unit: &str) -> String {
    format!("{}{}", value.round() as i64, unit)
}
