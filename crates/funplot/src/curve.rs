//! Curves given by explicit x and y samples.

use crate::{drawable::Drawable, error::OptionError, figure::Figure, style::LineStyle};

/// A connected line through `(x[i], y[i])`.
///
/// The two sequences should have the same length; the figure ignores the
/// extra samples of the longer one and logs a warning.
///
/// ```
/// # use funplot::Curve;
/// let t: Vec<f64> = (0..=64).map(|i| i as f64 * std::f64::consts::TAU / 64.0).collect();
/// let circle = Curve::new(
///     t.iter().map(|t| t.cos()).collect::<Vec<_>>(),
///     t.iter().map(|t| t.sin()).collect::<Vec<_>>(),
/// )
/// .style_option("ls", "--")
/// .unwrap();
/// assert_eq!(circle.xs().len(), 65);
/// ```
#[derive(Debug, Clone)]
pub struct Curve {
    xs: Vec<f64>,
    ys: Vec<f64>,
    style: LineStyle,
    label: Option<String>,
}

impl Curve {
    pub fn new(xs: impl Into<Vec<f64>>, ys: impl Into<Vec<f64>>) -> Self {
        Self {
            xs: xs.into(),
            ys: ys.into(),
            style: LineStyle::default(),
            label: None,
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets one style property by name; `label` sets the legend label.
    pub fn style_option(mut self, key: &str, value: &str) -> Result<Self, OptionError> {
        match key {
            "label" => self.label = Some(value.to_string()),
            _ => self.style.set(key, value)?,
        }
        Ok(self)
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drawable for Curve {
    fn render(&self, figure: &mut Figure) {
        figure.plot(&self.xs, &self.ys, &self.style, self.label.as_deref());
    }

    fn clone_box(&self) -> Box<dyn Drawable> {
        Box::new(self.clone())
    }
}
