//! Unconnected point sets.

use crate::{drawable::Drawable, error::OptionError, figure::Figure, style::MarkerStyle};

/// Markers at `(x[i], y[i])`, without connecting lines.
///
/// ```
/// # use funplot::Points;
/// let samples = Points::new([1.0, 2.0, 3.0], [2.0, 4.0, 8.0])
///     .style_option("marker", "s")
///     .unwrap()
///     .with_label("measured");
/// assert_eq!(samples.label(), Some("measured"));
/// ```
#[derive(Debug, Clone)]
pub struct Points {
    xs: Vec<f64>,
    ys: Vec<f64>,
    style: MarkerStyle,
    label: Option<String>,
}

impl Points {
    pub fn new(xs: impl Into<Vec<f64>>, ys: impl Into<Vec<f64>>) -> Self {
        Self {
            xs: xs.into(),
            ys: ys.into(),
            style: MarkerStyle::default(),
            label: None,
        }
    }

    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets one style property by name; `label` sets the legend label.
    ///
    /// See [`MarkerStyle::set`] for the accepted keys.
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

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drawable for Points {
    fn render(&self, figure: &mut Figure) {
        figure.scatter(&self.xs, &self.ys, &self.style, self.label.as_deref());
    }

    fn clone_box(&self) -> Box<dyn Drawable> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::SeriesKind;

    #[test]
    fn test_render_as_scatter() {
        let points = Points::new(vec![1.0, 2.0], vec![3.0, 4.0]);
        let mut figure = Figure::default();
        points.render(&mut figure);

        let series = &figure.series()[0];
        assert!(matches!(series.kind(), SeriesKind::Scatter { .. }));
        assert_eq!(series.ys(), [3.0, 4.0]);
        assert_eq!(series.label(), None);
    }
}
