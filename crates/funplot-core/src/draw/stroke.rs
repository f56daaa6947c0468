//! Stroke and line-style definitions.
//!
//! Every line in a figure (series, grid, frame, tick marks) is described by a
//! [`StrokeDefinition`] and emitted through the [`apply_stroke!`](crate::apply_stroke!)
//! macro.
//!
//! # Line Style Names
//!
//! [`StrokeStyle`] accepts both the short plotting notation and long names:
//!
//! | Short | Long | Pattern |
//! |-------|------|---------|
//! | `-` | `solid` | continuous |
//! | `--` | `dashed` | dashes |
//! | `:` | `dotted` | dots |
//! | `-.` | `dashdot` | dash, dot |
//! | `none`, `None`, ` ` | | no line |
//!
//! Dash patterns are expressed in multiples of the line width, so a thicker
//! dashed line keeps the same look.
//!
//! # Example
//!
//! ```
//! use funplot_core::color::Color;
//! use funplot_core::draw::{StrokeDefinition, StrokeStyle};
//! use svg::node::element as svg_element;
//!
//! let mut stroke = StrokeDefinition::new(Color::new("steelblue").unwrap(), 1.5);
//! stroke.set_style("--".parse().unwrap());
//! assert_eq!(*stroke.style(), StrokeStyle::Dashed);
//!
//! let path = svg_element::Path::new().set("d", "M0,0 L10,10");
//! let path = funplot_core::apply_stroke!(path, &stroke);
//! assert!(path.to_string().contains("stroke-dasharray"));
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Defines the visual pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashes, 3.7 widths long with 1.6 width gaps
    Dashed,
    /// Round-ish dots, one width long with 1.65 width gaps
    Dotted,
    /// Alternating dash and dot
    DashDot,
    /// No line at all; markers may still be drawn
    None,
    /// Custom SVG dasharray pattern in pixels, e.g. `"10,5,2,5"`
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" | "solid" => Ok(Self::Solid),
            "--" | "dashed" => Ok(Self::Dashed),
            ":" | "dotted" => Ok(Self::Dotted),
            "-." | "dashdot" | "dash-dot" => Ok(Self::DashDot),
            "none" | "None" | " " | "" => Ok(Self::None),
            pattern if is_dash_pattern(pattern) => Ok(Self::Custom(pattern.to_string())),
            _ => Err(format!(
                "invalid line style `{s}`, valid values: '-', '--', ':', '-.', 'none' or a dash pattern"
            )),
        }
    }
}

fn is_dash_pattern(s: &str) -> bool {
    let mut parts = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .peekable();
    parts.peek().is_some() && parts.all(|p| p.parse::<f32>().is_ok_and(|v| v >= 0.0))
}

impl StrokeStyle {
    /// Returns the SVG dasharray for a stroke of `width` pixels, or `None`
    /// for solid and invisible lines.
    pub fn to_svg_value(&self, width: f32) -> Option<String> {
        let scaled = |pattern: &[f32]| {
            pattern
                .iter()
                .map(|len| format!("{}", len * width.max(0.5)))
                .collect::<Vec<_>>()
                .join(",")
        };
        match self {
            Self::Solid | Self::None => None,
            Self::Dashed => Some(scaled(&[3.7, 1.6])),
            Self::Dotted => Some(scaled(&[1.0, 1.65])),
            Self::DashDot => Some(scaled(&[6.4, 1.6, 1.0, 1.6])),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }

    /// Returns true if nothing should be drawn for this style
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for StrokeCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" | "projecting" => Ok(Self::Square),
            _ => Err(format!(
                "invalid stroke cap `{s}`, valid values: butt, round, square"
            )),
        }
    }
}

/// Defines how line corners are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    Miter,
    /// Rounded corner, the default for data lines
    #[default]
    Round,
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for StrokeJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(format!(
                "invalid stroke join `{s}`, valid values: miter, round, bevel"
            )),
        }
    }
}

/// A stroke definition for rendering lines.
///
/// # Examples
///
/// ```
/// use funplot_core::draw::{StrokeDefinition, StrokeCap};
/// use funplot_core::color::Color;
///
/// let stroke = StrokeDefinition::default();
/// assert_eq!(stroke.width(), 1.0);
///
/// let mut stroke = StrokeDefinition::new(Color::new("blue").unwrap(), 1.5);
/// stroke.set_cap("round".parse().unwrap());
/// assert_eq!(stroke.cap(), StrokeCap::Round);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// SVG dasharray for this stroke's style at its own width.
    pub fn dasharray(&self) -> Option<String> {
        self.style.to_svg_value(self.width)
    }

    /// Returns true if the stroke draws nothing (style `none` or zero width).
    pub fn is_invisible(&self) -> bool {
        self.style.is_none() || self.width <= 0.0
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }

    /// Returns a copy of this stroke with every length multiplied by `factor`.
    ///
    /// Styles are given in points; figures scale them to pixels with this.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            ..self.clone()
        }
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Applies color, opacity, width, line cap, line join, and the dash pattern
/// (if not solid).
///
/// ```
/// use funplot_core::draw::StrokeDefinition;
/// use funplot_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = svg_element::Line::new().set("x1", 0).set("x2", 10);
///
/// let line = funplot_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", &$stroke.color())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Round);
    }

    #[test]
    fn test_stroke_solid() {
        let solid = StrokeDefinition::solid(Color::new("red").unwrap(), 2.0);
        assert_eq!(solid.width(), 2.0);
        assert_eq!(*solid.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_setters() {
        let mut stroke = StrokeDefinition::default();

        stroke.set_color(Color::new("green").unwrap());
        stroke.set_width(2.5);
        stroke.set_style(StrokeStyle::Dashed);
        stroke.set_cap(StrokeCap::Square);
        stroke.set_join(StrokeJoin::Bevel);

        assert_eq!(stroke.color().to_string(), "green");
        assert_eq!(stroke.width(), 2.5);
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
        assert_eq!(stroke.cap(), StrokeCap::Square);
        assert_eq!(stroke.join(), StrokeJoin::Bevel);
    }

    #[test]
    fn test_stroke_style_dasharray_scales_with_width() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(2.0), None);
        assert_eq!(StrokeStyle::None.to_svg_value(2.0), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(2.0), Some("7.4,3.2".to_string()));
        assert_eq!(StrokeStyle::Dotted.to_svg_value(2.0), Some("2,3.3".to_string()));
        assert_eq!(
            StrokeStyle::DashDot.to_svg_value(1.0),
            Some("6.4,1.6,1,1.6".to_string())
        );

        let custom = StrokeStyle::Custom("15,3,3,3".to_string());
        assert_eq!(custom.to_svg_value(4.0), Some("15,3,3,3".to_string()));
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("-".parse::<StrokeStyle>().unwrap(), StrokeStyle::Solid);
        assert_eq!("solid".parse::<StrokeStyle>().unwrap(), StrokeStyle::Solid);
        assert_eq!("--".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dashed);
        assert_eq!(":".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dotted);
        assert_eq!("-.".parse::<StrokeStyle>().unwrap(), StrokeStyle::DashDot);
        assert_eq!("none".parse::<StrokeStyle>().unwrap(), StrokeStyle::None);
        assert_eq!(
            "10,5,2,5".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::Custom("10,5,2,5".to_string())
        );

        let result = "wiggly".parse::<StrokeStyle>();
        assert!(result.unwrap_err().contains("invalid line style"));
    }

    #[test]
    fn test_stroke_cap_and_join_from_str() {
        assert_eq!("round".parse::<StrokeCap>().unwrap(), StrokeCap::Round);
        assert_eq!("projecting".parse::<StrokeCap>().unwrap(), StrokeCap::Square);
        assert!("pointy".parse::<StrokeCap>().is_err());

        assert_eq!("bevel".parse::<StrokeJoin>().unwrap(), StrokeJoin::Bevel);
        assert!("pointy".parse::<StrokeJoin>().is_err());
    }

    #[test]
    fn test_stroke_scaled_and_invisible() {
        let mut stroke = StrokeDefinition::new(Color::default(), 1.5);
        stroke.set_style(StrokeStyle::Dashed);
        let stroke = stroke.scaled(2.0);
        assert_eq!(stroke.width(), 3.0);
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);

        let mut hidden = StrokeDefinition::default();
        hidden.set_style(StrokeStyle::None);
        assert!(hidden.is_invisible());
        assert!(StrokeDefinition::new(Color::default(), 0.0).is_invisible());
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        use svg::node::element as svg_element;

        let mut stroke = StrokeDefinition::new(Color::new("red").unwrap().with_alpha(0.5), 2.0);
        stroke.set_style(StrokeStyle::Dotted);
        let rendered = crate::apply_stroke!(svg_element::Path::new(), &stroke).to_string();

        assert!(rendered.contains("stroke-opacity=\"0.5\""));
        assert!(rendered.contains("stroke-width=\"2\""));
        assert!(rendered.contains("stroke-dasharray=\"2,3.3\""));
        assert!(!rendered.contains("alpha"));
    }
}
