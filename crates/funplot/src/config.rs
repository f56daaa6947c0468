//! Configuration types for funplot figures.
//!
//! This module provides configuration structures that control figure
//! geometry and default styling. All types implement [`serde::Deserialize`]
//! so they can be loaded from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining figure and style settings.
//! - [`FigureConfig`] - Page size, resolution, background and fonts.
//! - [`StyleConfig`] - Series defaults: color cycle, line width, marker size.
//!
//! # Example
//!
//! ```
//! # use funplot::config::AppConfig;
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [figure]
//!     width = 8.0
//!     dpi = 150
//!
//!     [style]
//!     color_cycle = ["black", "gray"]
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.figure().width(), 8.0);
//! assert_eq!(config.figure().height(), 4.8);
//! assert_eq!(config.style().color_cycle().unwrap().len(), 2);
//! ```

use std::{fs, path::Path};

use log::info;
use serde::Deserialize;

use funplot_core::color::{Color, ColorCycle, DEFAULT_CYCLE};

use crate::error::FunplotError;

/// Top-level configuration combining figure and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Figure configuration section.
    #[serde(default)]
    figure: FigureConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(figure: FigureConfig, style: StyleConfig) -> Self {
        Self { figure, style }
    }

    /// Parses a configuration from TOML text. Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FunplotError::Config`] for malformed TOML, values of the
    /// wrong type, or sizes that [`AppConfig::validate`] rejects.
    pub fn from_toml_str(content: &str) -> Result<Self, FunplotError> {
        let config: Self =
            toml::from_str(content).map_err(|err| FunplotError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every size and resolution is a usable number.
    ///
    /// Page size, dpi and font size must be finite and positive; line width
    /// and marker size must be finite and not negative.
    ///
    /// # Errors
    ///
    /// Returns [`FunplotError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<(), FunplotError> {
        let figure = &self.figure;
        let style = &self.style;

        let positive = [
            ("figure.width", figure.width),
            ("figure.height", figure.height),
            ("figure.dpi", figure.dpi),
            ("figure.font_size", figure.font_size),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FunplotError::Config(format!(
                    "`{key}` must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("style.line_width", style.line_width),
            ("style.marker_size", style.marker_size),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FunplotError::Config(format!(
                    "`{key}` must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FunplotError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading configuration");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Returns the figure configuration.
    pub fn figure(&self) -> &FigureConfig {
        &self.figure
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Page geometry, resolution and text defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width in inches
    width: f32,
    /// Height in inches
    height: f32,
    /// Pixels per inch
    dpi: f32,
    background_color: String,
    font_family: String,
    /// Font size in points
    font_size: f32,
}

impl FigureConfig {
    /// Width in inches.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height in inches.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size in points.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid CSS
    /// color.
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn set_dpi(&mut self, dpi: f32) {
        self.dpi = dpi;
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 6.4,
            height: 4.8,
            dpi: 100.0,
            background_color: "white".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
        }
    }
}

/// Defaults applied to series that do not set their own style.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// CSS colors handed out in order to unstyled series
    color_cycle: Vec<String>,
    /// Line width in points
    line_width: f32,
    /// Marker diameter in points
    marker_size: f32,
}

impl StyleConfig {
    /// Returns the parsed color cycle.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first entry that is not a valid CSS color.
    pub fn color_cycle(&self) -> Result<ColorCycle, String> {
        ColorCycle::from_css(&self.color_cycle)
            .map_err(|err| format!("Invalid color cycle in config: {err}"))
    }

    /// Line width in points.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Marker diameter in points.
    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn set_color_cycle<S: Into<String>>(&mut self, colors: impl IntoIterator<Item = S>) {
        self.color_cycle = colors.into_iter().map(Into::into).collect();
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_cycle: DEFAULT_CYCLE.iter().map(|c| c.to_string()).collect(),
            line_width: 1.5,
            marker_size: 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.figure().width(), 6.4);
        assert_eq!(config.figure().height(), 4.8);
        assert_eq!(config.figure().dpi(), 100.0);
        assert_eq!(config.figure().font_size(), 10.0);
        assert!(config.figure().background_color().is_ok());
        assert_eq!(config.style().line_width(), 1.5);
        assert_eq!(config.style().color_cycle().unwrap().len(), 10);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.figure().dpi(), 100.0);
        assert_eq!(config.style().marker_size(), 6.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[figure]\ndpi = \"high\"").unwrap_err();
        assert!(matches!(err, FunplotError::Config(_)));
    }

    #[test]
    fn test_invalid_colors_are_reported() {
        let config =
            AppConfig::from_toml_str("[figure]\nbackground_color = \"nope\"\n[style]\ncolor_cycle = [\"red\", \"bogus\"]")
                .unwrap();
        assert!(config.figure().background_color().is_err());
        let err = config.style().color_cycle().unwrap_err();
        assert!(err.contains("bogus"));
    }

    #[test]
    fn test_unusable_sizes_are_rejected() {
        for content in [
            "[figure]\nfont_size = 0.0",
            "[figure]\nfont_size = -5.0",
            "[figure]\ndpi = 0.0",
            "[figure]\nwidth = -1.0",
            "[figure]\nheight = nan",
            "[style]\nline_width = -1.0",
            "[style]\nmarker_size = inf",
        ] {
            let err = AppConfig::from_toml_str(content).unwrap_err();
            assert!(matches!(err, FunplotError::Config(_)), "{content}: {err}");
        }

        let err = AppConfig::from_toml_str("[figure]\nfont_size = 0.0").unwrap_err();
        assert!(err.to_string().contains("figure.font_size"));
    }

    #[test]
    fn test_setters_are_validated() {
        let mut config = AppConfig::default();
        config.figure.set_dpi(0.0);
        assert!(matches!(config.validate(), Err(FunplotError::Config(_))));

        config.figure.set_dpi(72.0);
        assert!(config.validate().is_ok());
    }
}
