// Renderer-agnostic draw primitives
use crate::domain::chart::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash pattern as `(dash, gap)`.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, dash: (f64, f64)) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    None,
    Solid(Color),
    /// Reference to a gradient declared on the scene.
    Gradient(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub anchor: Anchor,
    pub bold: bool,
}

/// Vertical gradient of one colour with varying opacity, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub id: String,
    pub color: Color,
    /// `(offset 0..=1, opacity 0..=1)` pairs.
    pub stops: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Path {
        d: String,
        fill: Fill,
        stroke: Option<Stroke>,
        /// Use the even-odd fill rule, needed for rings.
        even_odd: bool,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Fill,
        corner_radius: f64,
        tooltip: Option<String>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Fill,
    },
    Text {
        at: Point,
        content: String,
        style: TextStyle,
    },
    Group {
        translate: Point,
        children: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub gradients: Vec<LinearGradient>,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            gradients: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    /// Depth-first iteration over every node, groups included.
    #[cfg(test)]
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Node::Group { children, .. } = node {
                stack.extend(children.iter().rev());
            }
            Some(node)
        })
    }
}

/// What a renderer hands back: the designed empty state or a full scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawing {
    Placeholder { message: String, min_height: f64 },
    Scene(Scene),
}

impl Drawing {
    pub fn placeholder(message: impl Into<String>, min_height: f64) -> Self {
        Drawing::Placeholder {
            message: message.into(),
            min_height,
        }
    }

    #[cfg(test)]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Drawing::Placeholder { .. })
    }

    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Drawing::Scene(scene) => Some(scene),
            Drawing::Placeholder { .. } => None,
        }
    }
}
