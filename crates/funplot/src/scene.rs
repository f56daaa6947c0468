//! Scenes: a drawable group plus figure-level options.
//!
//! A [`Scene`] is the unit that gets shown or saved. Adding to a scene
//! returns a new scene with the operand appended and the options unchanged,
//! so a base scene can be reused:
//!
//! ```no_run
//! # use funplot::{Function, Scene};
//! let base = Scene::new().title("Waves").grid(true).legend(true);
//!
//! let sine = &base + Function::parse("sin(x)")?.with_label("sin");
//! let both = &sine + Function::parse("cos(x)")?.with_label("cos");
//!
//! sine.save("sine.svg")?;
//! both.save("both.png")?;
//! # Ok::<(), funplot::FunplotError>(())
//! ```

use std::{
    fmt,
    ops::Add,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info};

use funplot_core::axis::Interval;

use crate::{
    config::AppConfig,
    curve::Curve,
    drawable::{Drawable, DrawableGroup, Plottable, combine},
    error::{FunplotError, OptionError},
    export::{self, SaveOptions},
    figure::Figure,
    function::Function,
    points::Points,
    viewer,
};

/// A figure-level setting, applied after all drawables have rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureOption {
    XLim(f64, f64),
    YLim(f64, f64),
    Title(String),
    XLabel(String),
    YLabel(String),
    Grid(bool),
    Legend(bool),
}

impl FigureOption {
    /// The option's name, which is also its key in a scene.
    pub fn name(&self) -> &'static str {
        match self {
            Self::XLim(..) => "xlim",
            Self::YLim(..) => "ylim",
            Self::Title(_) => "title",
            Self::XLabel(_) => "xlabel",
            Self::YLabel(_) => "ylabel",
            Self::Grid(_) => "grid",
            Self::Legend(_) => "legend",
        }
    }

    /// Parses an option from its name and textual value.
    ///
    /// Limits are two numbers separated by a comma or whitespace; switches
    /// accept `true`/`false`, `on`/`off`, `yes`/`no` and `1`/`0`.
    ///
    /// ```
    /// # use funplot::FigureOption;
    /// assert_eq!(FigureOption::parse("xlim", "-1, 2.5").unwrap(), FigureOption::XLim(-1.0, 2.5));
    /// assert_eq!(FigureOption::parse("grid", "on").unwrap(), FigureOption::Grid(true));
    /// assert!(FigureOption::parse("zlim", "0 1").is_err());
    /// ```
    pub fn parse(name: &str, value: &str) -> Result<Self, OptionError> {
        match name {
            "xlim" => parse_limits(name, value).map(|(start, end)| Self::XLim(start, end)),
            "ylim" => parse_limits(name, value).map(|(start, end)| Self::YLim(start, end)),
            "title" => Ok(Self::Title(value.to_string())),
            "xlabel" => Ok(Self::XLabel(value.to_string())),
            "ylabel" => Ok(Self::YLabel(value.to_string())),
            "grid" => parse_switch(name, value).map(Self::Grid),
            "legend" => parse_switch(name, value).map(Self::Legend),
            _ => Err(OptionError::unknown(name)),
        }
    }

    /// Applies the option through the matching figure setter.
    pub fn apply(&self, figure: &mut Figure) {
        match self {
            Self::XLim(start, end) => figure.set_xlim(Interval::new(*start, *end)),
            Self::YLim(start, end) => figure.set_ylim(Interval::new(*start, *end)),
            Self::Title(title) => figure.set_title(title.as_str()),
            Self::XLabel(label) => figure.set_xlabel(label.as_str()),
            Self::YLabel(label) => figure.set_ylabel(label.as_str()),
            Self::Grid(grid) => figure.set_grid(*grid),
            Self::Legend(legend) => figure.set_legend(*legend),
        }
    }
}

impl fmt::Display for FigureOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XLim(start, end) | Self::YLim(start, end) => {
                write!(f, "{}={start}, {end}", self.name())
            }
            Self::Title(text) | Self::XLabel(text) | Self::YLabel(text) => {
                write!(f, "{}={text:?}", self.name())
            }
            Self::Grid(on) | Self::Legend(on) => write!(f, "{}={on}", self.name()),
        }
    }
}

fn parse_limits(name: &str, value: &str) -> Result<(f64, f64), OptionError> {
    let parts: Vec<&str> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [start, end] = parts.as_slice() else {
        return Err(OptionError::invalid(name, value, "expected two numbers"));
    };

    let parse = |part: &str| match part.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        Ok(_) => Err(OptionError::invalid(name, value, "limits must be finite")),
        Err(err) => Err(OptionError::invalid(name, value, err.to_string())),
    };
    Ok((parse(start)?, parse(end)?))
}

fn parse_switch(name: &str, value: &str) -> Result<bool, OptionError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(OptionError::invalid(name, value, "expected true or false")),
    }
}

/// A group of drawables plus the figure options they are shown with.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    group: DrawableGroup,
    options: IndexMap<&'static str, FigureOption>,
    config: AppConfig,
}

impl Scene {
    /// Creates an empty scene with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration figures are created with.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn group(&self) -> &DrawableGroup {
        &self.group
    }

    /// Options in the order they are applied.
    pub fn options(&self) -> impl Iterator<Item = &FigureOption> {
        self.options.values()
    }

    pub fn option(&self, name: &str) -> Option<&FigureOption> {
        self.options.get(name)
    }

    /// Sets an option. Setting an option again replaces its value and keeps
    /// its original position.
    pub fn with_option(mut self, option: FigureOption) -> Self {
        self.insert_option(option);
        self
    }

    /// Sets an option from its name and textual value.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError`] for unknown names or unparsable values; the
    /// scene is left unchanged.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        let option = FigureOption::parse(name, value)?;
        self.insert_option(option);
        Ok(())
    }

    fn insert_option(&mut self, option: FigureOption) {
        self.options.insert(option.name(), option);
    }

    pub fn xlim(self, start: f64, end: f64) -> Self {
        self.with_option(FigureOption::XLim(start, end))
    }

    pub fn ylim(self, start: f64, end: f64) -> Self {
        self.with_option(FigureOption::YLim(start, end))
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.with_option(FigureOption::Title(title.into()))
    }

    pub fn xlabel(self, label: impl Into<String>) -> Self {
        self.with_option(FigureOption::XLabel(label.into()))
    }

    pub fn ylabel(self, label: impl Into<String>) -> Self {
        self.with_option(FigureOption::YLabel(label.into()))
    }

    pub fn grid(self, grid: bool) -> Self {
        self.with_option(FigureOption::Grid(grid))
    }

    pub fn legend(self, legend: bool) -> Self {
        self.with_option(FigureOption::Legend(legend))
    }

    /// Returns a new scene with `rhs` appended; same as `&scene + rhs`.
    pub fn plus(&self, rhs: impl Into<Plottable>) -> Scene {
        self + rhs
    }

    /// Renders the drawables in order, then applies the options in order.
    pub fn render(&self, figure: &mut Figure) {
        self.group.render(figure);
        for option in self.options.values() {
            debug!(option:% = option; "Applying figure option");
            option.apply(figure);
        }
    }

    /// Renders the scene into a fresh figure.
    ///
    /// # Errors
    ///
    /// Returns [`FunplotError::Config`] if the configuration holds invalid
    /// colors.
    pub fn figure(&self) -> Result<Figure, FunplotError> {
        let mut figure = Figure::new(&self.config)?;
        self.render(&mut figure);
        Ok(figure)
    }

    /// Renders the scene to SVG text.
    pub fn to_svg(&self) -> Result<String, FunplotError> {
        Ok(self.figure()?.to_document().to_string())
    }

    /// Saves the scene, inferring the format from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FunplotError> {
        self.save_with(path, &SaveOptions::default())
    }

    /// Saves the scene with explicit options.
    ///
    /// The figure is created for this call and dropped before it returns.
    ///
    /// # Errors
    ///
    /// Returns [`FunplotError::InvalidOption`] for a non-positive dpi and
    /// [`FunplotError::Export`] for unsupported formats and rendering,
    /// encoding or I/O failures.
    pub fn save_with(
        &self,
        path: impl AsRef<Path>,
        options: &SaveOptions,
    ) -> Result<(), FunplotError> {
        let path = path.as_ref();
        let format = options.resolve_format(path)?;

        let mut figure = self.figure()?;
        if let Some(dpi) = options.dpi() {
            figure = figure.with_dpi(dpi)?;
        }
        figure.set_transparent(options.transparent());

        info!(
            path:? = path,
            format:% = format,
            dpi = figure.dpi(),
            series_count = figure.series().len();
            "Saving scene"
        );
        export::exporter_for(path, format, options.quality()).export_figure(&figure)?;
        Ok(())
    }

    /// Opens the scene in the platform's SVG viewer and waits for the
    /// viewer command to return.
    ///
    /// Returns the path of the temporary SVG file, which is kept.
    pub fn show(&self) -> Result<PathBuf, FunplotError> {
        let figure = self.figure()?;
        info!(series_count = figure.series().len(); "Showing scene");
        viewer::show_document(&figure.to_document())
    }
}

impl<R: Into<Plottable>> Add<R> for Scene {
    type Output = Scene;

    fn add(mut self, rhs: R) -> Self::Output {
        let group = std::mem::take(&mut self.group);
        self.group = combine(Plottable::Group(group), rhs.into());
        self
    }
}

impl<R: Into<Plottable>> Add<R> for &Scene {
    type Output = Scene;

    fn add(self, rhs: R) -> Self::Output {
        self.clone() + rhs
    }
}

impl From<Plottable> for Scene {
    fn from(plottable: Plottable) -> Self {
        Scene::new() + plottable
    }
}

/// Implements `From<$ty> for Scene` for drawables.
macro_rules! impl_scene_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Scene {
                fn from(drawable: $ty) -> Self {
                    Scene::from(Plottable::from(drawable))
                }
            }
        )*
    };
}

impl_scene_from!(Function, Curve, Points, DrawableGroup);

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_curve(label: &str) -> Curve {
        Curve::new(vec![0.0, 1.0], vec![0.0, 1.0]).with_label(label)
    }

    fn labels(figure: &Figure) -> Vec<&str> {
        figure.series().iter().filter_map(|s| s.label()).collect()
    }

    #[test]
    fn test_options_keep_insertion_order() {
        let mut scene = Scene::new().title("first").grid(true).xlim(0.0, 1.0);
        scene.set_option("title", "second").unwrap();

        let names: Vec<&str> = scene.options().map(FigureOption::name).collect();
        assert_eq!(names, ["title", "grid", "xlim"]);
        assert_eq!(
            scene.option("title"),
            Some(&FigureOption::Title("second".into()))
        );
    }

    #[test]
    fn test_set_option_errors_leave_scene_unchanged() {
        let mut scene = Scene::new();
        assert_eq!(
            scene.set_option("zlim", "0 1"),
            Err(OptionError::unknown("zlim"))
        );
        assert!(matches!(
            scene.set_option("xlim", "0"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(matches!(
            scene.set_option("ylim", "0, inf"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(matches!(
            scene.set_option("legend", "maybe"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert_eq!(scene.options().count(), 0);
    }

    #[test]
    fn test_render_applies_options_after_drawables() {
        let scene = Scene::from(labeled_curve("a"))
            .xlim(-5.0, 5.0)
            .xlabel("x")
            .legend(true);
        let figure = scene.figure().unwrap();

        assert_eq!(labels(&figure), ["a"]);
        assert_eq!(figure.xlim(), Some(Interval::new(-5.0, 5.0)));
        assert_eq!(figure.xlabel(), Some("x"));
        assert!(figure.legend());
        assert!(!figure.grid());
    }

    #[test]
    fn test_add_copies_scene() {
        let base = Scene::new().title("base");
        let one = &base + labeled_curve("one");
        let two = one.plus(labeled_curve("two"));

        assert!(base.group().is_empty());
        assert_eq!(one.group().len(), 1);
        assert_eq!(two.group().len(), 2);
        assert_eq!(two.option("title"), base.option("title"));
    }

    #[test]
    fn test_add_group_flattens() {
        let scene = Scene::new() + (labeled_curve("a") + labeled_curve("b")) + labeled_curve("c");
        assert_eq!(scene.group().len(), 3);
        assert_eq!(labels(&scene.figure().unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn test_invalid_config_color() {
        let config = AppConfig::from_toml_str("[figure]\nbackground_color = \"nope\"").unwrap();
        let err = Scene::new().with_config(config).to_svg().unwrap_err();
        assert!(matches!(err, FunplotError::Config(_)));
    }

    #[test]
    fn test_save_rejects_bad_format_and_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let scene = Scene::from(labeled_curve("a"));

        let err = scene.save(dir.path().join("plot.gif")).unwrap_err();
        assert!(matches!(err, FunplotError::Export(_)));
        assert!(!dir.path().join("plot.gif").exists());

        let options = SaveOptions::new().with_dpi(0.0);
        let err = scene
            .save_with(dir.path().join("plot.svg"), &options)
            .unwrap_err();
        assert!(matches!(err, FunplotError::InvalidOption(_)));
    }

    #[test]
    fn test_display_option() {
        assert_eq!(FigureOption::XLim(0.0, 1.5).to_string(), "xlim=0, 1.5");
        assert_eq!(FigureOption::Title("t".into()).to_string(), "title=\"t\"");
        assert_eq!(FigureOption::Legend(false).to_string(), "legend=false");
    }
}
