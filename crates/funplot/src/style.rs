//! Per-series styles.
//!
//! Styles hold only what the user chose; anything left unset is resolved by
//! the [`Figure`](crate::Figure) at plot time from the configuration and the
//! color cycle. Sizes are in points.
//!
//! Styles can also be set by name with the familiar short keys:
//!
//! ```
//! # use funplot::style::LineStyle;
//! let mut style = LineStyle::new();
//! style.set("color", "crimson").unwrap();
//! style.set("ls", "--").unwrap();
//! style.set("lw", "2.5").unwrap();
//! assert_eq!(style.width(), Some(2.5));
//! assert!(style.set("colour", "red").is_err());
//! ```

use std::str::FromStr;

use funplot_core::{
    color::Color,
    draw::{MarkerShape, StrokeCap, StrokeJoin, StrokeStyle},
};

use crate::error::OptionError;

/// Style of a connected line, optionally with markers at the samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyle {
    color: Option<Color>,
    width: Option<f32>,
    line_style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
    alpha: Option<f32>,
    marker: Option<MarkerShape>,
    marker_size: Option<f32>,
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Line width in points
    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn line_style(&self) -> &StrokeStyle {
        &self.line_style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    pub fn marker(&self) -> Option<MarkerShape> {
        self.marker
    }

    pub fn marker_size(&self) -> Option<f32> {
        self.marker_size
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_line_style(mut self, line_style: StrokeStyle) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_marker(mut self, marker: MarkerShape) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_marker_size(mut self, size: f32) -> Self {
        self.marker_size = Some(size);
        self
    }

    /// Sets one style property by name.
    ///
    /// Accepted keys: `color`/`c`, `linewidth`/`lw`, `linestyle`/`ls`,
    /// `solid_capstyle`/`capstyle`, `solid_joinstyle`/`joinstyle`, `alpha`,
    /// `marker`, `markersize`/`ms`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::Unknown`] for other keys and
    /// [`OptionError::InvalidValue`] when the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionError> {
        match key {
            "color" | "c" => self.color = Some(parse_color(key, value)?),
            "linewidth" | "lw" => self.width = Some(parse_size(key, value)?),
            "linestyle" | "ls" => {
                self.line_style = StrokeStyle::from_str(value)
                    .map_err(|reason| OptionError::invalid(key, value, reason))?;
            }
            "solid_capstyle" | "capstyle" => {
                self.cap = StrokeCap::from_str(value)
                    .map_err(|reason| OptionError::invalid(key, value, reason))?;
            }
            "solid_joinstyle" | "joinstyle" => {
                self.join = StrokeJoin::from_str(value)
                    .map_err(|reason| OptionError::invalid(key, value, reason))?;
            }
            "alpha" => self.alpha = Some(parse_alpha(key, value)?),
            "marker" => {
                self.marker = match value {
                    "" | "none" | "None" => None,
                    _ => Some(parse_marker(key, value)?),
                };
            }
            "markersize" | "ms" => self.marker_size = Some(parse_size(key, value)?),
            _ => return Err(OptionError::unknown(key)),
        }
        Ok(())
    }
}

/// Style of unconnected point markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerStyle {
    color: Option<Color>,
    shape: MarkerShape,
    size: Option<f32>,
    edge_color: Option<Color>,
    alpha: Option<f32>,
}

impl MarkerStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn shape(&self) -> MarkerShape {
        self.shape
    }

    /// Marker diameter in points
    pub fn size(&self) -> Option<f32> {
        self.size
    }

    pub fn edge_color(&self) -> Option<Color> {
        self.edge_color
    }

    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_shape(mut self, shape: MarkerShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = Some(color);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Sets one style property by name.
    ///
    /// Accepted keys: `color`/`c`, `marker`, `s`/`markersize`/`ms`,
    /// `edgecolor`/`ec`, `alpha`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionError> {
        match key {
            "color" | "c" => self.color = Some(parse_color(key, value)?),
            "marker" => self.shape = parse_marker(key, value)?,
            "s" | "markersize" | "ms" => self.size = Some(parse_size(key, value)?),
            "edgecolor" | "edgecolors" | "ec" => {
                self.edge_color = Some(parse_color(key, value)?);
            }
            "alpha" => self.alpha = Some(parse_alpha(key, value)?),
            _ => return Err(OptionError::unknown(key)),
        }
        Ok(())
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color, OptionError> {
    Color::new(value).map_err(|reason| OptionError::invalid(key, value, reason))
}

fn parse_marker(key: &str, value: &str) -> Result<MarkerShape, OptionError> {
    MarkerShape::from_str(value).map_err(|reason| OptionError::invalid(key, value, reason))
}

fn parse_size(key: &str, value: &str) -> Result<f32, OptionError> {
    match value.trim().parse::<f32>() {
        Ok(size) if size.is_finite() && size >= 0.0 => Ok(size),
        Ok(_) => Err(OptionError::invalid(
            key,
            value,
            "must be a non-negative number",
        )),
        Err(err) => Err(OptionError::invalid(key, value, err.to_string())),
    }
}

fn parse_alpha(key: &str, value: &str) -> Result<f32, OptionError> {
    match value.trim().parse::<f32>() {
        Ok(alpha) if (0.0..=1.0).contains(&alpha) => Ok(alpha),
        Ok(_) => Err(OptionError::invalid(key, value, "must be between 0 and 1")),
        Err(err) => Err(OptionError::invalid(key, value, err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_style_keys() {
        let mut style = LineStyle::new();
        style.set("c", "#ff0000").unwrap();
        style.set("linestyle", ":").unwrap();
        style.set("alpha", "0.5").unwrap();
        style.set("marker", "o").unwrap();
        style.set("ms", "4").unwrap();

        assert_eq!(style.color(), Some(Color::new("red").unwrap()));
        assert_eq!(*style.line_style(), StrokeStyle::Dotted);
        assert_eq!(style.alpha(), Some(0.5));
        assert_eq!(style.marker(), Some(MarkerShape::Circle));
        assert_eq!(style.marker_size(), Some(4.0));

        style.set("marker", "none").unwrap();
        assert_eq!(style.marker(), None);
    }

    #[test]
    fn test_cap_and_join_keys() {
        let mut style = LineStyle::new();
        assert_eq!(style.cap(), StrokeCap::Butt);
        assert_eq!(style.join(), StrokeJoin::Round);

        style.set("solid_capstyle", "projecting").unwrap();
        style.set("joinstyle", "bevel").unwrap();
        assert_eq!(style.cap(), StrokeCap::Square);
        assert_eq!(style.join(), StrokeJoin::Bevel);

        assert!(matches!(
            style.set("capstyle", "pointy"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(matches!(
            style.set("solid_joinstyle", "pointy"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert_eq!(style.cap(), StrokeCap::Square);
    }

    #[test]
    fn test_invalid_values() {
        let mut style = LineStyle::new();
        assert!(matches!(
            style.set("alpha", "1.5"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(matches!(
            style.set("lw", "-1"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(matches!(
            style.set("color", "notacolor"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert_eq!(style, LineStyle::default());
    }

    #[test]
    fn test_marker_style_keys() {
        let mut style = MarkerStyle::new();
        style.set("marker", "^").unwrap();
        style.set("s", "10").unwrap();
        style.set("ec", "black").unwrap();

        assert_eq!(style.shape(), MarkerShape::Triangle);
        assert_eq!(style.size(), Some(10.0));
        assert_eq!(style.edge_color(), Some(Color::new("black").unwrap()));
        assert_eq!(
            style.set("linewidth", "2"),
            Err(OptionError::unknown("linewidth"))
        );
    }
}
