//! Drawing primitives for figure rendering
//!
//! This module provides the styling definitions used by figure series and
//! decorations, and the z-ordered SVG output they render into.
//!
//! # Layer-Based Rendering
//!
//! Every element is emitted to a [`RenderLayer`]. Layers are ordered during
//! final SVG generation, so a series added after the axis frame still draws
//! below the tick labels.
mod layer;
mod marker;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use marker::{MarkerDefinition, MarkerShape};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{TextAnchor, TextDefinition};
