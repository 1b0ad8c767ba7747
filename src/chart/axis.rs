// Axis layout - gridlines, y labels and time labels
use super::format;
use super::scale::{Domain, LinearScale};
use super::scene::{Anchor, Node, Point, Stroke, TextStyle};
use super::theme::ChartTheme;
use crate::domain::sample::Sample;

/// Number of intervals between horizontal gridlines; lines sit at `i / 5` for `i in 0..=5`.
pub const GRID_DIVISIONS: usize = 5;
/// Horizontal room reserved per x label before the line chart starts thinning.
pub const MIN_LABEL_SPACING: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub value: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XTick {
    pub index: usize,
    pub x: f64,
    pub label: String,
}

pub struct AxisRenderer;

impl AxisRenderer {
    /// Six evenly spaced levels from the bottom to the top of the plot.
    pub fn y_ticks(domain: &Domain, scale: &LinearScale) -> Vec<YTick> {
        domain
            .levels(GRID_DIVISIONS)
            .map(|value| YTick {
                value,
                y: scale.map(value),
            })
            .collect()
    }

    /// One label per sample at the sample's x position.
    pub fn x_ticks(samples: &[Sample], x_of: impl Fn(usize) -> f64) -> Vec<XTick> {
        samples
            .iter()
            .enumerate()
            .map(|(index, sample)| XTick {
                index,
                x: x_of(index),
                label: format::time_of_day(&sample.timestamp),
            })
            .collect()
    }

    /// Keeps every `stride`-th label so neighbours sit at least `min_spacing`
    /// pixels apart. The first and last labels always survive; a stride label
    /// too close to the last one is dropped instead.
    pub fn thin(ticks: Vec<XTick>, available: f64, min_spacing: f64) -> Vec<XTick> {
        let count = ticks.len();
        if count < 3 || available <= 0.0 {
            return ticks;
        }
        let per_label = available / (count - 1) as f64;
        if per_label >= min_spacing {
            return ticks;
        }
        let stride = (min_spacing / per_label).ceil() as usize;
        let last = count - 1;
        ticks
            .into_iter()
            .filter(|t| {
                t.index == last || (t.index % stride == 0 && last - t.index >= stride)
            })
            .collect()
    }

    /// Dashed horizontal gridlines from `left` to `right` at each tick.
    pub fn gridlines(ticks: &[YTick], left: f64, right: f64, theme: &ChartTheme) -> Vec<Node> {
        ticks
            .iter()
            .map(|t| Node::Line {
                from: Point::new(left, t.y),
                to: Point::new(right, t.y),
                stroke: Stroke::dashed(theme.grid_line.clone(), 1.0, (5.0, 5.0)),
            })
            .collect()
    }

    /// Integer y labels right-aligned just left of the plot.
    pub fn y_labels(ticks: &[YTick], left: f64, unit: &str, theme: &ChartTheme) -> Vec<Node> {
        ticks
            .iter()
            .map(|t| Node::Text {
                at: Point::new(left - 10.0, t.y + 4.0),
                content: format::rounded(t.value, unit),
                style: TextStyle {
                    size: theme.axis_label_size,
                    color: theme.axis_label.clone(),
                    anchor: Anchor::End,
                    bold: false,
                },
            })
            .collect()
    }

    /// Time labels centred under their x position at baseline `y`.
    pub fn x_labels(ticks: &[XTick], y: f64, theme: &ChartTheme) -> Vec<Node> {
        ticks
            .iter()
            .map(|t| Node::Text {
                at: Point::new(t.x, y),
                content: t.label.clone(),
                style: TextStyle {
                    size: theme.axis_label_size,
                    color: theme.axis_label.clone(),
                    anchor: Anchor::Middle,
                    bold: false,
                },
            })
            .collect()
    }
}
