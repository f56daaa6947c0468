//! Text rendering for figure titles, axis labels, tick labels and legends.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style (font, size, color, weight)
//! - [`TextAnchor`] - Horizontal alignment relative to the anchor point
//!
//! Text is emitted as SVG `<text>` elements, vertically centered on the
//! given position. Multi-line content becomes one `<tspan>` per line.
//!
//! # Measuring
//!
//! Layout needs to know how much room labels take (the legend box is sized
//! to its longest entry). [`TextDefinition::measure`] shapes the text with
//! cosmic-text against the system fonts.
//!
//! ```
//! # use funplot_core::draw::TextDefinition;
//! let mut style = TextDefinition::new();
//! style.set_font_size(14.0);
//!
//! let size = style.measure("sin(x)");
//! assert!(size.width() > 0.0);
//! assert!(size.height() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    geometry::{Point, Size},
};

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Defines the visual style for text elements in figures.
///
/// Font sizes are in pixels; figures convert from points using their dpi.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `13.9` (10pt at 100 dpi) |
/// | Color | `None` (SVG default, black) |
/// | Bold | `false` |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    color: Option<Color>,
    bold: bool,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family (e.g. "DejaVu Sans", "serif", "monospace").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` leaves the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Distance between consecutive baselines in pixels.
    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_SPACING
    }

    /// Calculates the size in pixels needed to display `text`.
    pub fn measure(&self, text: &str) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(text, self)
    }

    /// Renders `content` centered vertically on `position`.
    ///
    /// `rotation` is in degrees, clockwise, around `position`; y-axis labels
    /// use `-90.0`.
    ///
    /// ```
    /// # use funplot_core::draw::{TextAnchor, TextDefinition};
    /// # use funplot_core::geometry::Point;
    /// let style = TextDefinition::new();
    /// let label = style.render("y", Point::new(10.0, 200.0), TextAnchor::Middle, -90.0);
    /// assert!(label.to_string().contains("rotate(-90 10 200)"));
    /// ```
    pub fn render(
        &self,
        content: &str,
        position: Point,
        anchor: TextAnchor,
        rotation: f32,
    ) -> svg_element::Text {
        let lines: Vec<&str> = content.lines().collect();
        let line_height = self.line_height();
        let y_offset = -(lines.len() as f32 + 1.0) * line_height / 2.0;

        let mut rendered = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", anchor.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.font_family())
            .set("font-size", self.font_size());

        if self.bold {
            rendered = rendered.set("font-weight", "bold");
        }

        if let Some(color) = self.color() {
            rendered = rendered
                .set("fill", color)
                .set("fill-opacity", color.alpha());
        }

        if rotation != 0.0 {
            rendered = rendered.set(
                "transform",
                format!("rotate({} {} {})", rotation, position.x(), position.y()),
            );
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered = rendered.add(tspan);
        }

        rendered
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 10.0 * 100.0 / 72.0,
            color: None,
            bold: false,
        }
    }
}

/// TextManager handles text measurement and font operations.
/// It maintains a reusable FontSystem instance to avoid expensive recreation.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculate the size of text in pixels using cosmic-text shaping.
    ///
    /// Falls back to an average glyph width estimate when no font could
    /// shape the text (e.g. a system without any installed fonts).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let font_size_px = text_def.font_size();
        let metrics = Metrics::new(font_size_px, text_def.line_height());

        let line_count = text.lines().count().max(1);
        let estimate = Size::new(
            text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f32
                * font_size_px
                * 0.55,
            line_count as f32 * metrics.line_height,
        );

        // A poisoned lock only means another measurement panicked mid-way
        let Ok(mut font_system) = self.font_system.lock() else {
            return estimate;
        };

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = if text_def.bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };
        let attrs = Attrs::new()
            .family(family(text_def.font_family()))
            .weight(weight);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        if max_width <= 0.0 {
            return estimate;
        }

        Size::new(max_width, total_height.max(estimate.height()))
    }
}

/// Maps CSS generic family names onto cosmic-text families.
fn family(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
