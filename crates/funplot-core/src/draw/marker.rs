//! Point markers for scatter series.
//!
//! A [`MarkerDefinition`] combines a [`MarkerShape`] with a size (the marker
//! diameter in pixels) and fill/edge colors. Shapes are parsed from the
//! usual single-character codes:
//!
//! | Code | Shape |
//! |------|-------|
//! | `o` | circle |
//! | `s` | square |
//! | `^` | triangle |
//! | `D` | diamond |
//! | `x` | cross |
//! | `+` | plus |
//! | `.` | small circle (point) |

use std::str::FromStr;

use svg::node::element as svg_element;

use crate::{color::Color, geometry::Point};

/// Applies the marker fill and edge to a closed shape.
macro_rules! paint {
    ($marker:expr, $element:expr) => {{
        let edge = $marker.edge();
        $element
            .set("fill", &$marker.fill)
            .set("fill-opacity", $marker.fill.alpha())
            .set("stroke", &edge)
            .set("stroke-opacity", edge.alpha())
            .set("stroke-width", $marker.edge_width)
    }};
}

/// Line-art shapes only have an edge, at least a sixth of the marker size wide.
macro_rules! outline {
    ($marker:expr, $element:expr) => {{
        let edge = $marker.edge();
        $element
            .set("fill", "none")
            .set("stroke", &edge)
            .set("stroke-opacity", edge.alpha())
            .set("stroke-width", $marker.edge_width.max($marker.size / 6.0))
    }};
}

/// The outline drawn at every data point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    #[default]
    Circle,
    /// A circle drawn at a third of the marker size
    Point,
    Square,
    Triangle,
    Diamond,
    Cross,
    Plus,
}

impl MarkerShape {
    /// Returns true for shapes drawn with strokes only (no fill area)
    pub fn is_line_art(self) -> bool {
        matches!(self, Self::Cross | Self::Plus)
    }
}

impl FromStr for MarkerShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "o" | "circle" => Ok(Self::Circle),
            "." | "point" => Ok(Self::Point),
            "s" | "square" => Ok(Self::Square),
            "^" | "triangle" => Ok(Self::Triangle),
            "D" | "d" | "diamond" => Ok(Self::Diamond),
            "x" | "cross" => Ok(Self::Cross),
            "+" | "plus" => Ok(Self::Plus),
            _ => Err(format!(
                "invalid marker `{s}`, valid values: 'o', '.', 's', '^', 'D', 'x', '+'"
            )),
        }
    }
}

/// Marker style for one scatter series.
///
/// # Examples
///
/// ```
/// use funplot_core::color::Color;
/// use funplot_core::draw::{MarkerDefinition, MarkerShape};
/// use funplot_core::geometry::Point;
///
/// let mut marker = MarkerDefinition::new(MarkerShape::Square, 6.0);
/// marker.set_fill(Color::new("orange").unwrap());
///
/// let node = marker.render(Point::new(10.0, 10.0));
/// assert!(node.to_string().contains("<rect"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDefinition {
    shape: MarkerShape,
    size: f32,
    fill: Color,
    edge: Option<Color>,
    edge_width: f32,
}

impl MarkerDefinition {
    pub fn new(shape: MarkerShape, size: f32) -> Self {
        Self {
            shape,
            size,
            ..Self::default()
        }
    }

    pub fn shape(&self) -> MarkerShape {
        self.shape
    }

    /// Marker diameter in pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Edge color; the fill color is used when unset
    pub fn edge(&self) -> Color {
        self.edge.unwrap_or(self.fill)
    }

    pub fn set_shape(&mut self, shape: MarkerShape) {
        self.shape = shape;
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    pub fn set_edge(&mut self, color: Option<Color>) {
        self.edge = color;
    }

    pub fn set_edge_width(&mut self, width: f32) {
        self.edge_width = width;
    }

    /// Returns a copy with size and edge width multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            size: self.size * factor,
            edge_width: self.edge_width * factor,
            ..self.clone()
        }
    }

    /// Renders the marker centered on `center`.
    pub fn render(&self, center: Point) -> Box<dyn svg::Node> {
        let (cx, cy) = (center.x(), center.y());
        let r = self.size / 2.0;

        match self.shape {
            MarkerShape::Circle | MarkerShape::Point => {
                let r = if self.shape == MarkerShape::Point {
                    r / 3.0
                } else {
                    r
                };
                let circle = svg_element::Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", r);
                Box::new(paint!(self, circle))
            }
            MarkerShape::Square => {
                let rect = svg_element::Rectangle::new()
                    .set("x", cx - r)
                    .set("y", cy - r)
                    .set("width", self.size)
                    .set("height", self.size);
                Box::new(paint!(self, rect))
            }
            MarkerShape::Triangle => {
                let points = format!(
                    "{},{} {},{} {},{}",
                    cx,
                    cy - r,
                    cx + r,
                    cy + r,
                    cx - r,
                    cy + r
                );
                Box::new(paint!(self, svg_element::Polygon::new().set("points", points)))
            }
            MarkerShape::Diamond => {
                let points = format!(
                    "{},{} {},{} {},{} {},{}",
                    cx,
                    cy - r,
                    cx + r,
                    cy,
                    cx,
                    cy + r,
                    cx - r,
                    cy
                );
                Box::new(paint!(self, svg_element::Polygon::new().set("points", points)))
            }
            MarkerShape::Cross => {
                let d = format!(
                    "M{},{} L{},{} M{},{} L{},{}",
                    cx - r,
                    cy - r,
                    cx + r,
                    cy + r,
                    cx - r,
                    cy + r,
                    cx + r,
                    cy - r
                );
                Box::new(outline!(self, svg_element::Path::new().set("d", d)))
            }
            MarkerShape::Plus => {
                let d = format!(
                    "M{},{} L{},{} M{},{} L{},{}",
                    cx - r,
                    cy,
                    cx + r,
                    cy,
                    cx,
                    cy - r,
                    cx,
                    cy + r
                );
                Box::new(outline!(self, svg_element::Path::new().set("d", d)))
            }
        }
    }
}

impl Default for MarkerDefinition {
    fn default() -> Self {
        Self {
            shape: MarkerShape::default(),
            size: 6.0,
            fill: Color::default(),
            edge: None,
            edge_width: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_shape_from_str() {
        assert_eq!("o".parse::<MarkerShape>().unwrap(), MarkerShape::Circle);
        assert_eq!("s".parse::<MarkerShape>().unwrap(), MarkerShape::Square);
        assert_eq!("^".parse::<MarkerShape>().unwrap(), MarkerShape::Triangle);
        assert_eq!("D".parse::<MarkerShape>().unwrap(), MarkerShape::Diamond);
        assert_eq!("x".parse::<MarkerShape>().unwrap(), MarkerShape::Cross);
        assert_eq!("+".parse::<MarkerShape>().unwrap(), MarkerShape::Plus);
        assert_eq!(".".parse::<MarkerShape>().unwrap(), MarkerShape::Point);

        let err = "*".parse::<MarkerShape>().unwrap_err();
        assert!(err.contains("invalid marker"));
    }

    #[test]
    fn test_marker_edge_defaults_to_fill() {
        let mut marker = MarkerDefinition::default();
        let red = Color::new("red").unwrap();
        marker.set_fill(red);
        assert_eq!(marker.edge(), red);

        let blue = Color::new("blue").unwrap();
        marker.set_edge(Some(blue));
        assert_eq!(marker.edge(), blue);
    }

    #[test]
    fn test_marker_render_shapes() {
        let center = Point::new(20.0, 30.0);
        let render = |shape| MarkerDefinition::new(shape, 10.0).render(center).to_string();

        let circle = render(MarkerShape::Circle);
        assert!(circle.contains("<circle"));
        assert!(circle.contains("r=\"5\""));

        let square = render(MarkerShape::Square);
        assert!(square.contains("x=\"15\""));
        assert!(square.contains("width=\"10\""));

        assert!(render(MarkerShape::Triangle).contains("points=\"20,25 25,35 15,35\""));
        assert!(render(MarkerShape::Diamond).contains("<polygon"));

        let cross = render(MarkerShape::Cross);
        assert!(cross.contains("fill=\"none\""));
        assert!(cross.contains("M15,25 L25,35"));
    }

    #[test]
    fn test_marker_scaled() {
        let marker = MarkerDefinition::new(MarkerShape::Plus, 6.0).scaled(2.0);
        assert_eq!(marker.size(), 12.0);
        assert_eq!(marker.shape(), MarkerShape::Plus);
        assert!(marker.shape().is_line_art());
    }
}
