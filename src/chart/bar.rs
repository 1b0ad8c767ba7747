// Bar chart renderer - grouped bars per sample
use super::axis::{AxisRenderer, GRID_DIVISIONS};
use super::format;
use super::legend::{LegendLayout, LegendRenderer};
use super::scale::{COUNT_FLOOR, Domain};
use super::scene::{Anchor, Drawing, Fill, Node, Point, Scene, Stroke, TextStyle};
use super::theme::ChartTheme;
use crate::domain::chart::{ChartConfig, Padding};
use crate::domain::sample::Sample;

pub const DEFAULT_HEIGHT: f64 = 340.0;
pub const DEFAULT_PADDING: Padding = Padding::new(20.0, 50.0, 90.0, 50.0);
pub const MIN_BAR_WIDTH: f64 = 20.0;
pub const MAX_BAR_WIDTH: f64 = 40.0;
/// Space between bars of one group.
pub const BAR_GAP: f64 = 4.0;
/// Visible height for a strictly positive value that would otherwise vanish.
pub const MIN_VISIBLE_HEIGHT: f64 = 4.0;
const PLACEHOLDER_HEIGHT: f64 = 200.0;
const DEFAULT_UNIT: &str = "MB/s";

/// Bar width for a container, kept legible at both low and high sample counts.
pub fn bar_width(container_width: f64, sample_count: usize) -> f64 {
    if sample_count == 0 {
        return MIN_BAR_WIDTH;
    }
    let raw = (container_width - 100.0) / sample_count as f64 / 2.0 - 10.0;
    if raw.is_nan() {
        return MIN_BAR_WIDTH;
    }
    raw.clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

/// Height of one bar in a plot `plot_height` pixels tall.
pub fn bar_height(value: f64, domain_max: f64, plot_height: f64) -> f64 {
    if !(value > 0.0) || !(domain_max > 0.0) {
        return 0.0;
    }
    (value / domain_max * plot_height).max(MIN_VISIBLE_HEIGHT)
}

/// Grouped bars, one group per sample and one bar per series.
pub struct BarChartRenderer;

impl BarChartRenderer {
    pub fn render(samples: &[Sample], config: &ChartConfig, theme: &ChartTheme) -> Drawing {
        if samples.is_empty() || config.series.is_empty() {
            return Drawing::placeholder(theme.empty_message.clone(), PLACEHOLDER_HEIGHT);
        }
        let floor = config.domain_floor.unwrap_or(COUNT_FLOOR);
        let Some(domain) = Domain::from_samples(samples, &config.series, floor) else {
            return Drawing::placeholder(theme.empty_message.clone(), PLACEHOLDER_HEIGHT);
        };

        let height = config.height.unwrap_or(DEFAULT_HEIGHT);
        let padding = config.padding.unwrap_or(DEFAULT_PADDING);
        let count = samples.len();
        let series_count = config.series.len();

        let bw = bar_width(config.width, count);
        let group_width = series_count as f64 * bw + (series_count - 1) as f64 * BAR_GAP;
        let plot_width = (config.width - padding.left - padding.right).max(0.0);
        // Groups never overlap; the scene grows wider instead.
        let slot = (plot_width / count as f64).max(group_width + bw / 2.0);
        let width = config.width.max(padding.left + slot * count as f64 + padding.right);

        let left = padding.left;
        let right = width - padding.right;
        let top = padding.top;
        let bottom = height - padding.bottom;
        let plot_height = (bottom - top).max(0.0);

        let mut scene = Scene::new(width, height);

        for i in 0..=GRID_DIVISIONS {
            let fraction = i as f64 / GRID_DIVISIONS as f64;
            let y = bottom - fraction * plot_height;
            scene.push(Node::Line {
                from: Point::new(left, y),
                to: Point::new(right, y),
                stroke: Stroke::dashed(theme.grid_line.clone(), 1.0, (5.0, 5.0)),
            });
            scene.push(Node::Text {
                at: Point::new(10.0, y + 4.0),
                content: format::decimal(domain.max * fraction, 2),
                style: TextStyle {
                    size: theme.axis_label_size + 1.0,
                    color: theme.axis_label_muted.clone(),
                    anchor: Anchor::Start,
                    bold: false,
                },
            });
        }

        let unit = config.unit.as_deref().unwrap_or(DEFAULT_UNIT);
        for (i, sample) in samples.iter().enumerate() {
            let center = left + slot * (i as f64 + 0.5);
            let group_left = center - group_width / 2.0;

            for (j, series) in config.series.iter().enumerate() {
                let value = series.value_of(sample);
                let h = bar_height(value, domain.max, plot_height);
                scene.push(Node::Rect {
                    origin: Point::new(group_left + j as f64 * (bw + BAR_GAP), bottom - h),
                    width: bw,
                    height: h,
                    fill: Fill::Solid(series.color.clone()),
                    corner_radius: 4.0,
                    tooltip: Some(format!(
                        "{}: {} {}",
                        series.label,
                        format::decimal(value, 2),
                        unit
                    )),
                });
            }
        }

        let ticks = AxisRenderer::x_ticks(samples, |i| left + slot * (i as f64 + 0.5));
        scene.extend(AxisRenderer::x_labels(&ticks, bottom + 18.0, theme));

        scene.extend(LegendRenderer::render(
            &config.series,
            LegendLayout::Centered {
                center_x: width / 2.0,
                y: bottom + 45.0,
            },
            theme,
        ));

        tracing::trace!(
            surface = %config.surface,
            samples = count,
            bar_width = bw,
            domain_max = domain.max,
            "Rendered bar chart"
        );

        Drawing::Scene(scene)
    }
}
