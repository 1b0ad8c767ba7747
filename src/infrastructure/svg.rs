// SVG adapter - writes a chart scene as markup
use crate::chart::scene::{Anchor, Drawing, Fill, Node, Scene, Stroke};
use std::fmt::Write;

/// Rendered output for one surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Svg(String),
    Html(String),
}

impl Markup {
    pub fn content_type(&self) -> &'static str {
        match self {
            Markup::Svg(_) => "image/svg+xml",
            Markup::Html(_) => "text/html; charset=utf-8",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Markup::Svg(body) | Markup::Html(body) => body,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Markup::Svg(body) | Markup::Html(body) => body,
        }
    }
}

pub fn render_drawing(drawing: &Drawing) -> Markup {
    match drawing {
        Drawing::Scene(scene) => Markup::Svg(render_scene(scene)),
        Drawing::Placeholder { message, min_height } => Markup::Html(render_placeholder(message, *min_height)),
    }
}

/// Centred message box standing in for a chart with nothing to draw.
pub fn render_placeholder(message: &str, min_height: f64) -> String {
    format!(
        r#"<div class="chart-empty" style="display:flex;align-items:center;justify-content:center;min-height:{}px;color:#999;">{}</div>"#,
        num(min_height),
        escape_html(message)
    )
}

pub fn render_scene(scene: &Scene) -> String {
    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(scene.width),
        h = num(scene.height)
    );

    if !scene.gradients.is_empty() {
        out.push_str("<defs>");
        for gradient in &scene.gradients {
            let _ = write!(
                out,
                r#"<linearGradient id="{}" x1="0" y1="0" x2="0" y2="1">"#,
                escape_html(&gradient.id)
            );
            for (offset, opacity) in &gradient.stops {
                let _ = write!(
                    out,
                    r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
                    num(offset * 100.0),
                    gradient.color,
                    num(*opacity)
                );
            }
            out.push_str("</linearGradient>");
        }
        out.push_str("</defs>");
    }

    for node in &scene.nodes {
        write_node(&mut out, node);
    }
    out.push_str("</svg>");
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Line { from, to, stroke } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                stroke_attrs(stroke)
            );
        }
        Node::Path {
            d,
            fill,
            stroke,
            even_odd,
        } => {
            if d.is_empty() {
                return;
            }
            let _ = write!(out, r#"<path d="{}" fill="{}""#, d, fill_attr(fill));
            if *even_odd {
                out.push_str(r#" fill-rule="evenodd""#);
            }
            if let Some(stroke) = stroke {
                out.push_str(&stroke_attrs(stroke));
            }
            out.push_str("/>");
        }
        Node::Rect {
            origin,
            width,
            height,
            fill,
            corner_radius,
            tooltip,
        } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}""#,
                num(origin.x),
                num(origin.y),
                num(*width),
                num(*height),
                num(*corner_radius),
                fill_attr(fill)
            );
            match tooltip {
                Some(text) => {
                    let _ = write!(out, "><title>{}</title></rect>", escape_html(text));
                }
                None => out.push_str("/>"),
            }
        }
        Node::Circle { center, radius, fill } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                num(center.x),
                num(center.y),
                num(*radius),
                fill_attr(fill)
            );
        }
        Node::Text { at, content, style } => {
            let anchor = match style.anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}""#,
                num(at.x),
                num(at.y),
                num(style.size),
                style.color,
                anchor
            );
            if style.bold {
                out.push_str(r#" font-weight="bold""#);
            }
            let _ = write!(out, ">{}</text>", escape_html(content));
        }
        Node::Group { translate, children } => {
            let _ = write!(
                out,
                r#"<g transform="translate({},{})">"#,
                num(translate.x),
                num(translate.y)
            );
            for child in children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
    }
}

fn fill_attr(fill: &Fill) -> String {
    match fill {
        Fill::None => "none".to_string(),
        Fill::Solid(color) => color.to_string(),
        Fill::Gradient(id) => format!("url(#{})", escape_html(id)),
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(r#" stroke="{}" stroke-width="{}""#, stroke.color, num(stroke.width));
    if let Some((dash, gap)) = stroke.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{},{}""#, num(dash), num(gap));
    }
    attrs
}

/// Two decimals at most, trailing zeros trimmed.
fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scene::{LinearGradient, Point, TextStyle};
    use crate::domain::chart::Color;

    #[test]
    fn test_num_trims() {
        assert_eq!(num(800.0), "800");
        assert_eq!(num(57.5), "57.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_placeholder_is_html() {
        let markup = render_drawing(&Drawing::placeholder("No <data>", 300.0));
        assert_eq!(markup.content_type(), "text/html; charset=utf-8");
        assert!(markup.as_str().contains("min-height:300px"));
        assert!(markup.as_str().contains("No &lt;data&gt;"));
    }

    #[test]
    fn test_scene_to_svg() {
        let mut scene = Scene::new(200.0, 100.0);
        scene.gradients.push(LinearGradient {
            id: "gradient0".to_string(),
            color: Color::BLUE,
            stops: vec![(0.0, 0.3), (1.0, 0.05)],
        });
        scene.push(Node::Line {
            from: Point::new(0.0, 10.0),
            to: Point::new(200.0, 10.0),
            stroke: Stroke::dashed(Color::GRAY, 1.0, (5.0, 5.0)),
        });
        scene.push(Node::Path {
            d: "M0.00 0.00 L10.00 10.00".to_string(),
            fill: Fill::Gradient("gradient0".to_string()),
            stroke: None,
            even_odd: false,
        });
        scene.push(Node::Rect {
            origin: Point::new(5.0, 5.0),
            width: 20.0,
            height: 57.5,
            fill: Fill::Solid(Color::CYAN),
            corner_radius: 4.0,
            tooltip: Some("Inbound: 2.00 MB/s".to_string()),
        });
        scene.push(Node::Group {
            translate: Point::new(50.0, 10.0),
            children: vec![Node::Text {
                at: Point::new(18.0, 10.0),
                content: "CPU & load".to_string(),
                style: TextStyle {
                    size: 12.0,
                    color: Color::LABEL,
                    anchor: Anchor::Start,
                    bold: true,
                },
            }],
        });

        let svg = render_drawing(&Drawing::Scene(scene));
        assert_eq!(svg.content_type(), "image/svg+xml");
        let svg = svg.into_string();
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">"#));
        assert!(svg.contains(r##"<stop offset="0%" stop-color="#5470c6" stop-opacity="0.3"/>"##));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));
        assert!(svg.contains(r#"fill="url(#gradient0)""#));
        assert!(svg.contains("<title>Inbound: 2.00 MB/s</title></rect>"));
        assert!(svg.contains(r#"<g transform="translate(50,10)">"#));
        assert!(svg.contains(r#"font-weight="bold">CPU &amp; load</text>"#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_empty_paths_are_skipped() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.push(Node::Path {
            d: String::new(),
            fill: Fill::None,
            stroke: None,
            even_odd: false,
        });
        assert!(!render_scene(&scene).contains("<path"));
    }
}
