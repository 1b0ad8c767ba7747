// Line chart renderer - multi-series trend with gradient areas
use super::axis::{AxisRenderer, MIN_LABEL_SPACING};
use super::legend::{LegendLayout, LegendRenderer};
use super::path::{area_path, line_path};
use super::scale::{Domain, IndexScale, LinearScale, PERCENT_FLOOR};
use super::scene::{Drawing, Fill, LinearGradient, Node, Point, Scene, Stroke};
use super::theme::ChartTheme;
use crate::domain::chart::{ChartConfig, Padding};
use crate::domain::sample::Sample;

pub const DEFAULT_HEIGHT: f64 = 400.0;
pub const DEFAULT_PADDING: Padding = Padding::new(30.0, 30.0, 50.0, 50.0);
const PLACEHOLDER_HEIGHT: f64 = 300.0;
const LINE_WIDTH: f64 = 2.0;
const MARKER_RADIUS: f64 = 3.0;
/// Area gradient opacity at the top and bottom of the plot.
const GRADIENT_STOPS: [(f64, f64); 2] = [(0.0, 0.3), (1.0, 0.05)];

/// Multi-series trend chart with a gradient-filled area under each line.
pub struct LineChartRenderer;

impl LineChartRenderer {
    /// Needs at least two samples and one series; anything less is the empty state.
    pub fn render(samples: &[Sample], config: &ChartConfig, theme: &ChartTheme) -> Drawing {
        if samples.len() < 2 || config.series.is_empty() {
            return Drawing::placeholder(theme.empty_message.clone(), PLACEHOLDER_HEIGHT);
        }
        let floor = config.domain_floor.unwrap_or(PERCENT_FLOOR);
        let Some(domain) = Domain::from_samples(samples, &config.series, floor) else {
            return Drawing::placeholder(theme.empty_message.clone(), PLACEHOLDER_HEIGHT);
        };

        let width = config.width;
        let height = config.height.unwrap_or(DEFAULT_HEIGHT);
        let padding = config.padding.unwrap_or(DEFAULT_PADDING);
        let (left, right) = (padding.left, width - padding.right);
        let (top, bottom) = (padding.top, height - padding.bottom);

        let Some(x_scale) = IndexScale::new(samples.len(), (left, right)) else {
            return Drawing::placeholder(theme.empty_message.clone(), PLACEHOLDER_HEIGHT);
        };
        let y_scale = LinearScale::vertical(domain, top, bottom);

        let mut scene = Scene::new(width, height);

        let y_ticks = AxisRenderer::y_ticks(&domain, &y_scale);
        scene.extend(AxisRenderer::gridlines(&y_ticks, left, right, theme));

        let x_ticks = AxisRenderer::x_ticks(samples, |i| x_scale.map(i));
        let x_ticks = AxisRenderer::thin(x_ticks, right - left, MIN_LABEL_SPACING);
        scene.extend(AxisRenderer::x_labels(&x_ticks, height - padding.bottom + 20.0, theme));

        let unit = config.unit.as_deref().unwrap_or("%");
        scene.extend(AxisRenderer::y_labels(&y_ticks, left, unit, theme));

        for (index, series) in config.series.iter().enumerate() {
            let points: Vec<Point> = samples
                .iter()
                .enumerate()
                .map(|(i, sample)| Point::new(x_scale.map(i), y_scale.map(series.value_of(sample))))
                .collect();

            // Scoped by surface: every chart on a page shares one id namespace.
            let gradient_id = format!("{}-gradient{}", config.surface, index);
            scene.gradients.push(LinearGradient {
                id: gradient_id.clone(),
                color: series.color.clone(),
                stops: GRADIENT_STOPS.to_vec(),
            });

            scene.push(Node::Path {
                d: area_path(&points, bottom),
                fill: Fill::Gradient(gradient_id),
                stroke: None,
                even_odd: false,
            });
            scene.push(Node::Path {
                d: line_path(&points),
                fill: Fill::None,
                stroke: Some(Stroke::solid(series.color.clone(), LINE_WIDTH)),
                even_odd: false,
            });
            scene.extend(points.iter().map(|p| Node::Circle {
                center: *p,
                radius: MARKER_RADIUS,
                fill: Fill::Solid(series.color.clone()),
            }));
        }

        scene.extend(LegendRenderer::render(
            &config.series,
            LegendLayout::Row {
                origin: Point::new(left, 10.0),
            },
            theme,
        ));

        tracing::trace!(
            surface = %config.surface,
            samples = samples.len(),
            series = config.series.len(),
            domain_max = domain.max,
            "Rendered line chart"
        );

        Drawing::Scene(scene)
    }
}
