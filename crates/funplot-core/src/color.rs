//! Color handling for funplot figures
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`ColorCycle`] used to pick colors for series
//! that do not set one explicitly.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// The default series colors, in cycle order (the "tab10" palette).
pub const DEFAULT_CYCLE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use funplot_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use funplot_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the same color with full opacity.
    ///
    /// SVG carries opacity in separate `*-opacity` attributes, so paint values
    /// are emitted opaque and the alpha travels alongside.
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.opaque().to_string())
    }
}

/// An endless, wrapping sequence of series colors.
///
/// Figures draw from the cycle every time a series without an explicit color
/// is added, so the n-th unstyled series always gets the n-th color.
///
/// # Examples
///
/// ```
/// use funplot_core::color::{Color, ColorCycle};
///
/// let mut cycle = ColorCycle::new(vec![
///     Color::new("red").unwrap(),
///     Color::new("blue").unwrap(),
/// ]);
/// assert_eq!(cycle.next_color(), Color::new("red").unwrap());
/// assert_eq!(cycle.next_color(), Color::new("blue").unwrap());
/// assert_eq!(cycle.next_color(), Color::new("red").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ColorCycle {
    colors: Vec<Color>,
    position: usize,
}

impl ColorCycle {
    /// Creates a cycle over `colors`. An empty list cycles over black.
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            vec![Color::default()]
        } else {
            colors
        };
        Self {
            colors,
            position: 0,
        }
    }

    /// Parses every entry as a CSS color and builds a cycle from them.
    pub fn from_css<S: AsRef<str>>(colors: &[S]) -> Result<Self, String> {
        let colors = colors
            .iter()
            .map(|color| Color::new(color.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    /// Returns the next color and advances the cycle.
    pub fn next_color(&mut self) -> Color {
        let color = self.colors[self.position % self.colors.len()];
        self.position += 1;
        color
    }

    /// Number of distinct colors before the cycle repeats.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; an empty cycle falls back to black.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::from_css(&DEFAULT_CYCLE).expect("default cycle holds valid CSS colors")
    }
}
