//! Layer-based rendering system for SVG output.
//!
//! Figure elements are collected per [`RenderLayer`] and emitted in layer
//! order, which keeps decorations (grid, frame, labels) correctly stacked
//! around the data series regardless of the order they were produced in.
//!
//! # Example
//!
//! ```
//! # use funplot_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Rectangle, Text};
//!
//! let mut output = LayeredOutput::new();
//!
//! // Labels are produced first but still end up on top
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("y = x^2")));
//! output.add_to_layer(RenderLayer::Series, Box::new(Path::new()));
//! output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
//!
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 3);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
/// The `Ord` derive uses declaration order, so the first variant renders first (bottom),
/// and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Figure and plot-area fills, clip path definitions
    Background,
    /// Grid lines behind the data
    Grid,
    /// Lines drawn from functions and curves
    Series,
    /// Point markers
    Markers,
    /// Axes frame and tick marks
    Frame,
    /// Tick labels, axis labels and title
    Text,
    /// Legend box and entries
    Legend,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Series => "series",
            Self::Markers => "markers",
            Self::Frame => "frame",
            Self::Text => "text",
            Self::Legend => "legend",
        }
    }
}

/// Represents SVG nodes grouped by rendering layer.
///
/// Nodes within one layer keep their insertion order, which is how later
/// series are drawn on top of earlier ones.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    ///
    /// Nodes from the other output are appended after the existing nodes of
    /// the same layer.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes emitted to `layer` so far.
    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within a layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
