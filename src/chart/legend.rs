// Legend layout
use super::scene::{Anchor, Fill, Node, Point, TextStyle};
use super::theme::ChartTheme;
use crate::domain::chart::SeriesConfig;

const SWATCH: f64 = 12.0;
const SWATCH_TEXT_GAP: f64 = 6.0;
/// Horizontal offset between entries of a fixed-stride legend.
pub const ENTRY_STRIDE: f64 = 100.0;
/// Gap between entries of a centred legend.
const CENTERED_GAP: f64 = 20.0;

pub enum LegendLayout {
    /// Entry `i` starts at `origin.x + i * ENTRY_STRIDE`.
    Row { origin: Point },
    /// Entries packed by estimated label width, centred on `center_x`.
    Centered { center_x: f64, y: f64 },
}

pub struct LegendRenderer;

impl LegendRenderer {
    pub fn render(series: &[SeriesConfig], layout: LegendLayout, theme: &ChartTheme) -> Vec<Node> {
        match layout {
            LegendLayout::Row { origin } => series
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let at = Point::new(origin.x + i as f64 * ENTRY_STRIDE, origin.y);
                    Self::entry(s, at, theme)
                })
                .collect(),
            LegendLayout::Centered { center_x, y } => {
                let widths: Vec<f64> = series
                    .iter()
                    .map(|s| Self::entry_width(&s.label, theme))
                    .collect();
                let total = widths.iter().sum::<f64>()
                    + CENTERED_GAP * series.len().saturating_sub(1) as f64;
                let mut x = center_x - total / 2.0;
                series
                    .iter()
                    .zip(widths)
                    .map(|(s, width)| {
                        let node = Self::entry(s, Point::new(x, y), theme);
                        x += width + CENTERED_GAP;
                        node
                    })
                    .collect()
            }
        }
    }

    fn entry(series: &SeriesConfig, at: Point, theme: &ChartTheme) -> Node {
        Node::Group {
            translate: at,
            children: vec![
                Node::Rect {
                    origin: Point::new(0.0, 0.0),
                    width: SWATCH,
                    height: SWATCH,
                    fill: Fill::Solid(series.color.clone()),
                    corner_radius: 2.0,
                    tooltip: None,
                },
                Node::Text {
                    at: Point::new(SWATCH + SWATCH_TEXT_GAP, 10.0),
                    content: series.label.clone(),
                    style: TextStyle {
                        size: theme.legend_label_size,
                        color: theme.legend_label.clone(),
                        anchor: Anchor::Start,
                        bold: false,
                    },
                },
            ],
        }
    }

    /// Swatch plus a rough label width: wide glyphs (CJK) take a full em.
    pub fn entry_width(label: &str, theme: &ChartTheme) -> f64 {
        let em = theme.legend_label_size;
        let text: f64 = label
            .chars()
            .map(|c| if c.is_ascii() { em * 0.6 } else { em })
            .sum();
        SWATCH + SWATCH_TEXT_GAP + text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::Color;

    fn series() -> Vec<SeriesConfig> {
        vec![
            SeriesConfig::new("networkIn", "Inbound", Color::CYAN),
            SeriesConfig::new("networkOut", "Outbound", Color::TEAL),
        ]
    }

    fn origins(nodes: &[Node]) -> Vec<Point> {
        nodes
            .iter()
            .filter_map(|n| match n {
                Node::Group { translate, .. } => Some(*translate),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_row_layout_uses_fixed_stride() {
        let theme = ChartTheme::default();
        let nodes = LegendRenderer::render(
            &series(),
            LegendLayout::Row {
                origin: Point::new(50.0, 10.0),
            },
            &theme,
        );
        assert_eq!(
            origins(&nodes),
            vec![Point::new(50.0, 10.0), Point::new(150.0, 10.0)]
        );
    }

    #[test]
    fn test_centered_layout_is_symmetric() {
        let theme = ChartTheme::default();
        let s = series();
        let nodes = LegendRenderer::render(
            &s,
            LegendLayout::Centered {
                center_x: 400.0,
                y: 300.0,
            },
            &theme,
        );
        let o = origins(&nodes);
        assert_eq!(o.len(), 2);

        let last_width = LegendRenderer::entry_width(&s[1].label, &theme);
        let left_edge = o[0].x;
        let right_edge = o[1].x + last_width;
        assert!(((left_edge + right_edge) / 2.0 - 400.0).abs() < 1e-9);
        assert!(o[1].x > o[0].x + LegendRenderer::entry_width(&s[0].label, &theme));
    }

    #[test]
    fn test_empty_series_renders_nothing() {
        let theme = ChartTheme::default();
        let nodes = LegendRenderer::render(
            &[],
            LegendLayout::Centered {
                center_x: 400.0,
                y: 300.0,
            },
            &theme,
        );
        assert!(nodes.is_empty());
    }
}
