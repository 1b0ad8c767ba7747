// Radial gauge renderer - percent and bounded variants
use super::format;
use super::path::ring_segment_path;
use super::scene::{Anchor, Drawing, Fill, Node, Point, Scene, TextStyle};
use super::theme::ChartTheme;
use crate::domain::chart::{Color, GaugeConfig, GaugeKind};
use crate::domain::sample::Sample;

pub const GAUGE_SIZE: f64 = 100.0;
const PERCENT_CUTOUT: f64 = 30.0;
const BOUNDED_CUTOUT: f64 = 35.0;
const PLACEHOLDER_HEIGHT: f64 = GAUGE_SIZE;

/// Share of `max_value` covered by `value`, clamped to `0..=100`.
pub fn percentage(value: f64, max_value: f64) -> f64 {
    if !(max_value > 0.0) {
        return 0.0;
    }
    let pct = value / max_value * 100.0;
    if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) }
}

/// Red above 80, yellow above 60, green otherwise. Boundaries belong to the lower band.
pub fn threshold_color(percentage: f64) -> Color {
    if percentage > 80.0 {
        Color::RED
    } else if percentage > 60.0 {
        Color::YELLOW
    } else {
        Color::GREEN
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeReading {
    pub percentage: f64,
    pub color: Color,
    /// Centre readout, two decimals; percentage gauges append `%`.
    pub display: String,
}

impl GaugeReading {
    pub fn new(value: f64, config: &GaugeConfig) -> Self {
        let percentage = percentage(value, config.kind.max_value());
        let color = config
            .color
            .clone()
            .unwrap_or_else(|| threshold_color(percentage));
        let display = match config.kind {
            GaugeKind::Percent => format!("{}%", format::decimal(value, 2)),
            GaugeKind::Bounded { .. } => format::decimal(value, 2),
        };
        Self {
            percentage,
            color,
            display,
        }
    }
}

/// Conic-style ring: the value's share in its colour, the rest in gray,
/// and the numeric readout in a circular cutout.
pub struct RadialGaugeRenderer;

impl RadialGaugeRenderer {
    /// Reads the gauge's field from the latest sample; no sample means the empty state.
    pub fn render(latest: Option<&Sample>, config: &GaugeConfig, theme: &ChartTheme) -> Drawing {
        match latest {
            Some(sample) => {
                let value = sample.field(&config.key).unwrap_or(0.0);
                Drawing::Scene(Self::render_value(value, config, theme))
            }
            None => Drawing::placeholder("-", PLACEHOLDER_HEIGHT),
        }
    }

    pub fn render_value(value: f64, config: &GaugeConfig, theme: &ChartTheme) -> Scene {
        let reading = GaugeReading::new(value, config);
        let center = Point::new(GAUGE_SIZE / 2.0, GAUGE_SIZE / 2.0);
        let outer = GAUGE_SIZE / 2.0;
        let (inner, value_size) = match config.kind {
            GaugeKind::Percent => (PERCENT_CUTOUT, 14.0),
            GaugeKind::Bounded { .. } => (BOUNDED_CUTOUT, 18.0),
        };
        let boundary = reading.percentage / 100.0;

        let mut scene = Scene::new(GAUGE_SIZE, GAUGE_SIZE);
        for (from, to, color) in [
            (0.0, boundary, reading.color.clone()),
            (boundary, 1.0, theme.gauge_track.clone()),
        ] {
            let d = ring_segment_path(center, outer, inner, from, to);
            if d.is_empty() {
                continue;
            }
            scene.push(Node::Path {
                d,
                fill: Fill::Solid(color),
                stroke: None,
                even_odd: to - from >= 1.0,
            });
        }
        scene.push(Node::Circle {
            center,
            radius: inner,
            fill: Fill::Solid(theme.gauge_center.clone()),
        });

        let value_y = if config.caption.is_some() { 52.0 } else { 55.0 };
        scene.push(Node::Text {
            at: Point::new(center.x, value_y),
            content: reading.display.clone(),
            style: TextStyle {
                size: value_size,
                color: theme.value_text.clone(),
                anchor: Anchor::Middle,
                bold: true,
            },
        });
        if let Some(caption) = &config.caption {
            scene.push(Node::Text {
                at: Point::new(center.x, 66.0),
                content: caption.clone(),
                style: TextStyle {
                    size: 11.0,
                    color: theme.axis_label_muted.clone(),
                    anchor: Anchor::Middle,
                    bold: false,
                },
            });
        }

        tracing::trace!(
            surface = %config.surface,
            value,
            percentage = reading.percentage,
            "Rendered gauge"
        );

        scene
    }
}
