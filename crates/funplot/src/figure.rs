//! The render target drawables record themselves onto.
//!
//! A [`Figure`] collects [`Series`] in data coordinates while drawables
//! render. Nothing is laid out until [`Figure::to_document`], which picks the
//! axis intervals (explicit limits or autoscaling), computes ticks, and
//! emits the SVG through a [`LayeredOutput`] so decorations stack correctly
//! around the data.
//!
//! Lengths in styles and configuration are in points; the figure converts
//! them to pixels with its dpi (`px = pt * dpi / 72`).
//!
//! ```
//! # use funplot::{Drawable, Figure, Function};
//! # use funplot::axis::Interval;
//! let mut figure = Figure::default();
//! Function::parse("x ** 3").unwrap().render(&mut figure);
//! figure.set_title("cubic");
//! figure.set_ylim(Interval::new(-100.0, 100.0));
//!
//! let svg = figure.to_document().to_string();
//! assert!(svg.contains("cubic"));
//! assert!(svg.contains(r#"data-layer="series""#));
//! ```

use log::{debug, trace, warn};
use svg::{Document, node::element as svg_element};

use funplot_core::{
    apply_stroke,
    axis::{AUTOSCALE_MARGIN, Interval, Scale, Tick, ticks},
    color::{Color, ColorCycle},
    draw::{
        LayeredOutput, MarkerDefinition, RenderLayer, StrokeDefinition, TextAnchor,
        TextDefinition,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{
    config::AppConfig,
    error::{FunplotError, OptionError},
    style::{LineStyle, MarkerStyle},
};

/// Space around the plot area, in inches.
const PLOT_INSETS: Insets = Insets::new(0.58, 0.64, 0.53, 0.8);
/// Padding between decorations, in points
const PAD: f32 = 3.5;
/// Length of tick marks, in points
const TICK_LENGTH: f32 = 3.5;
/// Width of the frame, tick marks and grid lines, in points
const FRAME_WIDTH: f32 = 0.8;
const TITLE_SCALE: f32 = 1.2;
const CLIP_ID: &str = "plot-area";
const GRID_COLOR: &str = "#b0b0b0";
const LEGEND_EDGE_COLOR: &str = "#cccccc";

/// How a series is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesKind {
    /// Connected line, optionally with a marker at every sample
    Line {
        stroke: StrokeDefinition,
        marker: Option<MarkerDefinition>,
    },
    /// Markers only
    Scatter { marker: MarkerDefinition },
}

/// One recorded data series, with its style resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    kind: SeriesKind,
    xs: Vec<f64>,
    ys: Vec<f64>,
    label: Option<String>,
}

impl Series {
    pub fn kind(&self) -> &SeriesKind {
        &self.kind
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Main color of the series
    pub fn color(&self) -> Color {
        match &self.kind {
            SeriesKind::Line { stroke, .. } => stroke.color(),
            SeriesKind::Scatter { marker } => marker.fill(),
        }
    }
}

/// The figure all drawables of a scene render onto.
#[derive(Debug, Clone)]
pub struct Figure {
    /// Page size in inches
    size: Size,
    dpi: f32,
    background: Color,
    transparent: bool,
    font_family: String,
    /// Font size in points
    font_size: f32,
    line_width: f32,
    marker_size: f32,
    colors: ColorCycle,
    series: Vec<Series>,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    xlim: Option<Interval>,
    ylim: Option<Interval>,
    grid: bool,
    legend: bool,
}

impl Figure {
    /// Creates an empty figure with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FunplotError::Config`] if a size is unusable (see
    /// [`AppConfig::validate`]) or the background color or the color cycle
    /// contains an invalid color.
    pub fn new(config: &AppConfig) -> Result<Self, FunplotError> {
        config.validate()?;
        let figure = config.figure();
        let style = config.style();

        Ok(Self {
            size: Size::new(figure.width(), figure.height()),
            dpi: figure.dpi(),
            background: figure.background_color().map_err(FunplotError::Config)?,
            transparent: false,
            font_family: figure.font_family().to_string(),
            font_size: figure.font_size(),
            line_width: style.line_width(),
            marker_size: style.marker_size(),
            colors: style.color_cycle().map_err(FunplotError::Config)?,
            series: Vec::new(),
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: None,
            ylim: None,
            grid: false,
            legend: false,
        })
    }

    /// Overrides the resolution.
    ///
    /// # Errors
    ///
    /// Returns [`FunplotError::InvalidOption`] unless `dpi` is finite and
    /// positive.
    pub fn with_dpi(mut self, dpi: f32) -> Result<Self, FunplotError> {
        if !(dpi.is_finite() && dpi > 0.0) {
            let reason = "must be a positive number";
            return Err(OptionError::invalid("dpi", &dpi.to_string(), reason).into());
        }
        self.dpi = dpi;
        Ok(self)
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Page size in pixels.
    pub fn size_px(&self) -> Size {
        self.size.scale(self.dpi)
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn xlim(&self) -> Option<Interval> {
        self.xlim
    }

    pub fn ylim(&self) -> Option<Interval> {
        self.ylim
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    pub fn legend(&self) -> bool {
        self.legend
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    /// Fixes the x axis to `interval` instead of autoscaling.
    pub fn set_xlim(&mut self, interval: Interval) {
        self.xlim = Some(interval);
    }

    /// Fixes the y axis to `interval` instead of autoscaling.
    pub fn set_ylim(&mut self, interval: Interval) {
        self.ylim = Some(interval);
    }

    pub fn set_grid(&mut self, grid: bool) {
        self.grid = grid;
    }

    /// Shows a legend of the labeled series.
    pub fn set_legend(&mut self, legend: bool) {
        self.legend = legend;
    }

    /// Leaves the page background unpainted.
    pub fn set_transparent(&mut self, transparent: bool) {
        self.transparent = transparent;
    }

    /// Records a connected line through `(xs[i], ys[i])`.
    ///
    /// Unset style properties come from the configuration; a missing color
    /// takes the next color of the cycle.
    pub fn plot(&mut self, xs: &[f64], ys: &[f64], style: &LineStyle, label: Option<&str>) {
        let (xs, ys) = paired(xs, ys);

        let color = self.resolve_color(style.color(), style.alpha());
        let mut stroke = StrokeDefinition::new(color, style.width().unwrap_or(self.line_width));
        stroke.set_style(style.line_style().clone());
        stroke.set_cap(style.cap());
        stroke.set_join(style.join());

        let marker = style.marker().map(|shape| {
            let mut marker =
                MarkerDefinition::new(shape, style.marker_size().unwrap_or(self.marker_size));
            marker.set_fill(color);
            marker
        });

        trace!(samples = xs.len(), color:% = color, label:? = label; "Recorded line series");
        self.push_series(SeriesKind::Line { stroke, marker }, xs, ys, label);
    }

    /// Records unconnected markers at `(xs[i], ys[i])`.
    pub fn scatter(&mut self, xs: &[f64], ys: &[f64], style: &MarkerStyle, label: Option<&str>) {
        let (xs, ys) = paired(xs, ys);

        let color = self.resolve_color(style.color(), style.alpha());
        let mut marker =
            MarkerDefinition::new(style.shape(), style.size().unwrap_or(self.marker_size));
        marker.set_fill(color);
        marker.set_edge(style.edge_color());

        trace!(samples = xs.len(), color:% = color, label:? = label; "Recorded scatter series");
        self.push_series(SeriesKind::Scatter { marker }, xs, ys, label);
    }

    fn resolve_color(&mut self, color: Option<Color>, alpha: Option<f32>) -> Color {
        let color = color.unwrap_or_else(|| self.colors.next_color());
        match alpha {
            Some(alpha) => color.with_alpha(alpha),
            None => color,
        }
    }

    fn push_series(&mut self, kind: SeriesKind, xs: &[f64], ys: &[f64], label: Option<&str>) {
        self.series.push(Series {
            kind,
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            label: label.map(str::to_string),
        });
    }

    /// The axis intervals the figure will be drawn with.
    ///
    /// Explicit limits win; otherwise the finite data extents are padded by
    /// 5% on each side. Degenerate intervals are widened.
    pub fn view_intervals(&self) -> (Interval, Interval) {
        let x = self.xlim.unwrap_or_else(|| {
            autoscale(self.series.iter().flat_map(|s| s.xs.iter().copied()))
        });
        let y = self.ylim.unwrap_or_else(|| {
            autoscale(self.series.iter().flat_map(|s| s.ys.iter().copied()))
        });
        (x.nonsingular(), y.nonsingular())
    }

    /// Lays the figure out and renders it to an SVG document.
    pub fn to_document(&self) -> Document {
        let page = self.size_px();
        let page_bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), page);
        let plot_area = page_bounds.shrink(PLOT_INSETS.scale(self.dpi));

        let (x_interval, y_interval) = self.view_intervals();
        let mut text = TextDefinition::new();
        text.set_font_family(&self.font_family);
        text.set_font_size(self.points(self.font_size));

        let axes = Axes {
            plot_area,
            x: Scale::new(x_interval, plot_area.min_x(), plot_area.max_x()),
            y: Scale::new(y_interval, plot_area.max_y(), plot_area.min_y()),
            x_ticks: ticks(x_interval, max_intervals(plot_area.width(), text.font_size())),
            y_ticks: ticks(y_interval, max_intervals(plot_area.height(), text.font_size())),
        };

        debug!(
            series_count = self.series.len(),
            x_start = x_interval.start(),
            x_end = x_interval.end(),
            y_start = y_interval.start(),
            y_end = y_interval.end();
            "Laying out figure"
        );

        let mut output = LayeredOutput::new();
        if !self.transparent {
            output.add_to_layer(
                RenderLayer::Background,
                Box::new(
                    svg_element::Rectangle::new()
                        .set("width", page.width())
                        .set("height", page.height())
                        .set("fill", &self.background)
                        .set("fill-opacity", self.background.alpha()),
                ),
            );
        }

        if self.grid {
            output.merge(self.render_grid(&axes));
        }
        for series in &self.series {
            output.merge(self.render_series(series, &axes));
        }
        output.merge(self.render_frame(&axes));
        output.merge(self.render_labels(&axes, &text));
        if self.legend {
            output.merge(self.render_legend(&axes, &text));
        }

        let clip_path = svg_element::ClipPath::new().set("id", CLIP_ID).add(
            svg_element::Rectangle::new()
                .set("x", plot_area.min_x())
                .set("y", plot_area.min_y())
                .set("width", plot_area.width())
                .set("height", plot_area.height()),
        );

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", page.width(), page.height()))
            .set("width", page.width())
            .set("height", page.height())
            .add(svg_element::Definitions::new().add(clip_path));

        for node in output.render() {
            doc = doc.add(node);
        }
        doc
    }

    /// Converts points to pixels.
    fn points(&self, value: f32) -> f32 {
        value * self.dpi / 72.0
    }

    fn frame_stroke(&self, color: Color) -> StrokeDefinition {
        StrokeDefinition::solid(color, self.points(FRAME_WIDTH))
    }

    fn render_grid(&self, axes: &Axes) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let stroke = self.frame_stroke(known_color(GRID_COLOR));
        let area = axes.plot_area;

        for tick in &axes.x_ticks {
            let x = axes.x.map(tick.value());
            let line = svg_element::Line::new()
                .set("x1", x)
                .set("y1", area.min_y())
                .set("x2", x)
                .set("y2", area.max_y());
            output.add_to_layer(RenderLayer::Grid, Box::new(apply_stroke!(line, &stroke)));
        }
        for tick in &axes.y_ticks {
            let y = axes.y.map(tick.value());
            let line = svg_element::Line::new()
                .set("x1", area.min_x())
                .set("y1", y)
                .set("x2", area.max_x())
                .set("y2", y);
            output.add_to_layer(RenderLayer::Grid, Box::new(apply_stroke!(line, &stroke)));
        }
        output
    }

    fn render_series(&self, series: &Series, axes: &Axes) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let scale = self.dpi / 72.0;
        let points = series
            .xs
            .iter()
            .zip(&series.ys)
            .map(|(&x, &y)| Point::new(axes.x.map(x), axes.y.map(y)));

        let marker = match &series.kind {
            SeriesKind::Line { stroke, marker } => {
                let stroke = stroke.scaled(scale);
                let d = line_path(points.clone());
                if !stroke.is_invisible() && !d.is_empty() {
                    let path = svg_element::Path::new().set("d", d).set("fill", "none");
                    let group = clipped().add(apply_stroke!(path, &stroke));
                    output.add_to_layer(RenderLayer::Series, Box::new(group));
                }
                marker.as_ref()
            }
            SeriesKind::Scatter { marker } => Some(marker),
        };

        if let Some(marker) = marker {
            let marker = marker.scaled(scale);
            let group = points
                .filter(|point| point.is_finite())
                .fold(clipped(), |group, point| group.add(marker.render(point)));
            output.add_to_layer(RenderLayer::Markers, Box::new(group));
        }
        output
    }

    fn render_frame(&self, axes: &Axes) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let stroke = self.frame_stroke(Color::default());
        let area = axes.plot_area;
        let tick_length = self.points(TICK_LENGTH);

        let frame = svg_element::Rectangle::new()
            .set("x", area.min_x())
            .set("y", area.min_y())
            .set("width", area.width())
            .set("height", area.height())
            .set("fill", "none");
        output.add_to_layer(RenderLayer::Frame, Box::new(apply_stroke!(frame, &stroke)));

        for tick in &axes.x_ticks {
            let x = axes.x.map(tick.value());
            let mark = svg_element::Line::new()
                .set("x1", x)
                .set("y1", area.max_y())
                .set("x2", x)
                .set("y2", area.max_y() + tick_length);
            output.add_to_layer(RenderLayer::Frame, Box::new(apply_stroke!(mark, &stroke)));
        }
        for tick in &axes.y_ticks {
            let y = axes.y.map(tick.value());
            let mark = svg_element::Line::new()
                .set("x1", area.min_x() - tick_length)
                .set("y1", y)
                .set("x2", area.min_x())
                .set("y2", y);
            output.add_to_layer(RenderLayer::Frame, Box::new(apply_stroke!(mark, &stroke)));
        }
        output
    }

    fn render_labels(&self, axes: &Axes, text: &TextDefinition) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let area = axes.plot_area;
        let pad = self.points(PAD);
        let tick_length = self.points(TICK_LENGTH);
        let font_size = text.font_size();

        let x_label_y = area.max_y() + tick_length + pad + font_size / 2.0;
        for tick in &axes.x_ticks {
            let position = Point::new(axes.x.map(tick.value()), x_label_y);
            let label = text.render(tick.label(), position, TextAnchor::Middle, 0.0);
            output.add_to_layer(RenderLayer::Text, Box::new(label));
        }

        let y_label_x = area.min_x() - tick_length - pad;
        let mut widest = 0.0f32;
        for tick in &axes.y_ticks {
            widest = widest.max(text.measure(tick.label()).width());
            let position = Point::new(y_label_x, axes.y.map(tick.value()));
            let label = text.render(tick.label(), position, TextAnchor::End, 0.0);
            output.add_to_layer(RenderLayer::Text, Box::new(label));
        }

        if let Some(xlabel) = &self.xlabel {
            let y = x_label_y + font_size / 2.0 + pad + text.line_height() / 2.0;
            let position = Point::new(area.center().x(), y);
            let label = text.render(xlabel, position, TextAnchor::Middle, 0.0);
            output.add_to_layer(RenderLayer::Text, Box::new(label));
        }

        if let Some(ylabel) = &self.ylabel {
            let x = y_label_x - widest - pad - text.line_height() / 2.0;
            let position = Point::new(x, area.center().y());
            let label = text.render(ylabel, position, TextAnchor::Middle, -90.0);
            output.add_to_layer(RenderLayer::Text, Box::new(label));
        }

        if let Some(title) = &self.title {
            let mut title_text = text.clone();
            title_text.set_font_size(font_size * TITLE_SCALE);
            let y = area.min_y() - 2.0 * pad - title_text.line_height() / 2.0;
            let position = Point::new(area.center().x(), y);
            let label = title_text.render(title, position, TextAnchor::Middle, 0.0);
            output.add_to_layer(RenderLayer::Text, Box::new(label));
        }
        output
    }

    fn render_legend(&self, axes: &Axes, text: &TextDefinition) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let entries: Vec<(&Series, &str)> = self
            .series
            .iter()
            .filter_map(|series| series.label().map(|label| (series, label)))
            .collect();
        if entries.is_empty() {
            return output;
        }

        let scale = self.dpi / 72.0;
        let pad = self.points(PAD);
        let row_height = text.line_height();
        let sample_length = 2.0 * text.font_size();
        let label_width = entries
            .iter()
            .map(|(_, label)| text.measure(label).width())
            .fold(0.0f32, f32::max);

        let size = Size::new(
            3.0 * pad + sample_length + label_width,
            2.0 * pad + row_height * entries.len() as f32,
        );
        let area = axes.plot_area;
        let top_left = Point::new(area.max_x() - pad - size.width(), area.min_y() + pad);

        let edge = StrokeDefinition::solid(known_color(LEGEND_EDGE_COLOR), self.points(FRAME_WIDTH));
        let frame = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", pad / 2.0)
            .set("fill", &self.background)
            .set("fill-opacity", 0.8);
        output.add_to_layer(RenderLayer::Legend, Box::new(apply_stroke!(frame, &edge)));

        for (row, (series, label)) in entries.into_iter().enumerate() {
            let y = top_left.y() + pad + row_height * (row as f32 + 0.5);
            let start = top_left.x() + pad;
            let middle = Point::new(start + sample_length / 2.0, y);

            let marker = match &series.kind {
                SeriesKind::Line { stroke, marker } => {
                    let stroke = stroke.scaled(scale);
                    if !stroke.is_invisible() {
                        let line = svg_element::Line::new()
                            .set("x1", start)
                            .set("y1", y)
                            .set("x2", start + sample_length)
                            .set("y2", y);
                        output.add_to_layer(
                            RenderLayer::Legend,
                            Box::new(apply_stroke!(line, &stroke)),
                        );
                    }
                    marker.as_ref()
                }
                SeriesKind::Scatter { marker } => Some(marker),
            };
            if let Some(marker) = marker {
                output.add_to_layer(RenderLayer::Legend, marker.scaled(scale).render(middle));
            }

            let position = Point::new(start + sample_length + pad, y);
            let rendered = text.render(label, position, TextAnchor::Start, 0.0);
            output.add_to_layer(RenderLayer::Legend, Box::new(rendered));
        }
        output
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(&AppConfig::default()).expect("default configuration holds valid colors")
    }
}

/// Plot area geometry shared by the render passes.
struct Axes {
    plot_area: Bounds,
    x: Scale,
    y: Scale,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
}

/// Truncates both sequences to the shorter length.
fn paired<'a>(xs: &'a [f64], ys: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    if xs.len() != ys.len() {
        warn!(
            x_len = xs.len(),
            y_len = ys.len();
            "x and y have different lengths, ignoring the extra samples"
        );
    }
    let len = xs.len().min(ys.len());
    (&xs[..len], &ys[..len])
}

fn autoscale(values: impl Iterator<Item = f64>) -> Interval {
    Interval::from_values(values)
        .map(|interval| interval.with_margin(AUTOSCALE_MARGIN))
        .unwrap_or_default()
}

/// Tick density that keeps labels roughly four font sizes apart.
fn max_intervals(length: f32, font_size: f32) -> usize {
    ((length / (4.0 * font_size.max(1.0))) as usize).clamp(3, 9)
}

/// Builds SVG path data through `points`, starting a new segment after every
/// non-finite point.
fn line_path(points: impl Iterator<Item = Point>) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut pen_down = false;

    for point in points {
        if !point.is_finite() {
            pen_down = false;
            continue;
        }
        let command = if pen_down { 'L' } else { 'M' };
        segments.push(format!("{command}{},{}", point.x(), point.y()));
        pen_down = true;
    }
    segments.join(" ")
}

fn clipped() -> svg_element::Group {
    svg_element::Group::new().set("clip-path", format!("url(#{CLIP_ID})"))
}

fn known_color(css: &str) -> Color {
    Color::new(css).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use funplot_core::color::DEFAULT_CYCLE;
    use crate::config::{FigureConfig, StyleConfig};

    fn line(figure: &mut Figure, xs: &[f64], ys: &[f64], label: Option<&str>) {
        figure.plot(xs, ys, &LineStyle::default(), label);
    }

    #[test]
    fn test_autoscale_adds_margin() {
        let mut figure = Figure::default();
        line(&mut figure, &[0.0, 10.0], &[-1.0, 1.0], None);

        let (x, y) = figure.view_intervals();
        assert_approx_eq!(f64, x.start(), -0.5, epsilon = 1e-12);
        assert_approx_eq!(f64, x.end(), 10.5, epsilon = 1e-12);
        assert_approx_eq!(f64, y.start(), -1.1, epsilon = 1e-12);
        assert_approx_eq!(f64, y.end(), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_autoscale_ignores_non_finite_values() {
        let mut figure = Figure::default();
        line(&mut figure, &[0.0, 1.0, 2.0], &[0.0, f64::INFINITY, 2.0], None);

        let (_, y) = figure.view_intervals();
        assert_approx_eq!(f64, y.end(), 2.1, epsilon = 1e-12);
    }

    #[test]
    fn test_explicit_limits_win() {
        let mut figure = Figure::default();
        line(&mut figure, &[0.0, 10.0], &[0.0, 10.0], None);
        figure.set_xlim(Interval::new(2.0, 4.0));

        let (x, y) = figure.view_intervals();
        assert_eq!(x, Interval::new(2.0, 4.0));
        assert_approx_eq!(f64, y.end(), 10.5, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_figure_has_unit_view() {
        let figure = Figure::default();
        assert_eq!(figure.view_intervals(), (Interval::default(), Interval::default()));
        assert!(figure.to_document().to_string().contains("<svg"));
    }

    #[test]
    fn test_color_cycle_skips_styled_series() {
        let mut figure = Figure::default();
        line(&mut figure, &[0.0], &[0.0], None);
        figure.plot(
            &[0.0],
            &[0.0],
            &LineStyle::new().with_color(Color::new("black").unwrap()),
            None,
        );
        line(&mut figure, &[0.0], &[0.0], None);

        let colors: Vec<Color> = figure.series().iter().map(Series::color).collect();
        assert_eq!(colors[0], Color::new(DEFAULT_CYCLE[0]).unwrap());
        assert_eq!(colors[1], Color::new("black").unwrap());
        assert_eq!(colors[2], Color::new(DEFAULT_CYCLE[1]).unwrap());
    }

    #[test]
    fn test_sizes_scale_with_dpi() {
        let figure = Figure::default().with_dpi(200.0).unwrap();
        let size = figure.size_px();
        assert_approx_eq!(f32, size.width(), 1280.0, epsilon = 1e-3);
        assert_approx_eq!(f32, size.height(), 960.0, epsilon = 1e-3);
    }

    #[test]
    fn test_unusable_resolution_is_an_error() {
        for dpi in [0.0, -72.0, f32::NAN, f32::INFINITY] {
            let err = Figure::default().with_dpi(dpi).unwrap_err();
            assert!(matches!(err, FunplotError::InvalidOption(_)), "{dpi}");
        }

        let mut figure_config = FigureConfig::default();
        figure_config.set_dpi(0.0);
        let config = AppConfig::new(figure_config, StyleConfig::default());
        let err = Figure::new(&config).unwrap_err();
        assert!(matches!(err, FunplotError::Config(_)));
    }

    #[test]
    fn test_line_path_breaks_at_non_finite_points() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(f32::NAN, 2.0),
            Point::new(3.0, 3.0),
            Point::new(4.0, 4.0),
        ];
        assert_eq!(line_path(points.into_iter()), "M0,0 L1,1 M3,3 L4,4");
        assert_eq!(line_path(std::iter::empty()), "");
    }

    #[test]
    fn test_document_layers_and_decorations() {
        let mut figure = Figure::default();
        line(&mut figure, &[0.0, 1.0], &[0.0, 1.0], Some("identity"));
        figure.scatter(&[0.5], &[0.5], &MarkerStyle::default(), None);
        figure.set_title("Title text");
        figure.set_xlabel("time");
        figure.set_ylabel("value");
        figure.set_grid(true);

        let svg = figure.to_document().to_string();
        for layer in ["background", "grid", "series", "markers", "frame", "text"] {
            assert!(svg.contains(&format!(r#"data-layer="{layer}""#)), "missing {layer}");
        }
        assert!(!svg.contains(r#"data-layer="legend""#));
        assert!(svg.contains("Title text"));
        assert!(svg.contains("rotate(-90"));
        assert!(svg.contains(r#"clip-path="url(#plot-area)""#));

        figure.set_legend(true);
        let svg = figure.to_document().to_string();
        assert!(svg.contains(r#"data-layer="legend""#));
        assert!(svg.contains("identity"));
    }

    #[test]
    fn test_transparent_omits_background() {
        let mut figure = Figure::default();
        figure.set_transparent(true);
        let svg = figure.to_document().to_string();
        assert!(!svg.contains(r#"data-layer="background""#));
    }

    #[test]
    fn test_invisible_line_with_markers() {
        let mut figure = Figure::default();
        let style = LineStyle::new()
            .with_line_style("none".parse().unwrap())
            .with_marker("o".parse().unwrap());
        figure.plot(&[0.0, 1.0], &[0.0, 1.0], &style, None);

        let svg = figure.to_document().to_string();
        assert!(!svg.contains(r#"data-layer="series""#));
        assert!(svg.contains(r#"data-layer="markers""#));
    }

    #[test]
    fn test_line_cap_and_join_reach_svg() {
        let mut figure = Figure::default();
        let mut style = LineStyle::new();
        style.set("solid_capstyle", "round").unwrap();
        style.set("solid_joinstyle", "miter").unwrap();
        figure.plot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], &style, None);

        let svg = figure.to_document().to_string();
        assert!(svg.contains(r#"stroke-linecap="round""#));
        assert!(svg.contains(r#"stroke-linejoin="miter""#));
    }
}
