// Path building - SVG path data for lines, filled areas and gauge rings
use super::scene::Point;
use std::f64::consts::TAU;
use std::fmt::Write;

/// Path descriptor builder with a fluent API.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    fn separate(&mut self) {
        if !self.commands.is_empty() {
            self.commands.push(' ');
        }
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.separate();
        let _ = write!(self.commands, "M{:.2} {:.2}", p.x, p.y);
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.separate();
        let _ = write!(self.commands, "L{:.2} {:.2}", p.x, p.y);
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, clockwise: bool, p: Point) -> Self {
        self.separate();
        let _ = write!(
            self.commands,
            "A{:.2} {:.2} 0 {} {} {:.2} {:.2}",
            radius, radius, large_arc as u8, clockwise as u8, p.x, p.y
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.separate();
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Polyline through `points`. Empty when fewer than two points are given.
pub fn line_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return String::new();
    }
    rest.iter()
        .fold(PathBuilder::new().move_to(*first), |b, p| b.line_to(*p))
        .build()
}

/// The polyline closed down to `baseline_y`, forming a fillable region.
pub fn area_path(points: &[Point], baseline_y: f64) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return String::new();
    };
    if points.len() < 2 {
        return String::new();
    }
    points
        .iter()
        .fold(
            PathBuilder::new().move_to(Point::new(first.x, baseline_y)),
            |b, p| b.line_to(*p),
        )
        .line_to(Point::new(last.x, baseline_y))
        .close()
        .build()
}

/// Point on a circle at `fraction` of a full turn, starting at 12 o'clock
/// and moving clockwise in screen coordinates.
pub fn polar(center: Point, radius: f64, fraction: f64) -> Point {
    let angle = fraction * TAU;
    Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

/// Annular sector between two fractions of a full turn.
///
/// A sweep of a full turn or more yields the complete ring, drawn as two
/// half arcs per radius; fill it with the even-odd rule. A non-positive
/// sweep yields an empty path.
pub fn ring_segment_path(center: Point, outer: f64, inner: f64, from: f64, to: f64) -> String {
    let sweep = to - from;
    if !(sweep > 0.0) {
        return String::new();
    }
    if sweep >= 1.0 {
        return full_ring(center, outer, inner);
    }
    let large_arc = sweep > 0.5;
    PathBuilder::new()
        .move_to(polar(center, outer, from))
        .arc_to(outer, large_arc, true, polar(center, outer, to))
        .line_to(polar(center, inner, to))
        .arc_to(inner, large_arc, false, polar(center, inner, from))
        .close()
        .build()
}

fn full_ring(center: Point, outer: f64, inner: f64) -> String {
    let circle = |b: PathBuilder, r: f64| {
        b.move_to(polar(center, r, 0.0))
            .arc_to(r, true, true, polar(center, r, 0.5))
            .arc_to(r, true, true, polar(center, r, 0.0))
            .close()
    };
    let builder = circle(PathBuilder::new(), outer);
    if inner > 0.0 {
        circle(builder, inner).build()
    } else {
        builder.build()
    }
}
