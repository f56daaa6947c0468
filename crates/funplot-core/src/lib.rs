//! Funplot Core Types and Definitions
//!
//! This crate provides the drawing primitives shared by the funplot crates.
//! It includes:
//!
//! - **Colors**: CSS color handling and the default color cycle ([`color`] module)
//! - **Geometry**: Pixel-space points, sizes, bounds and insets ([`geometry`] module)
//! - **Axis**: Data intervals, data-to-pixel scales and tick generation ([`axis`] module)
//! - **Draw**: Strokes, markers, text and z-ordered SVG layers ([`draw`] module)

pub mod axis;
pub mod color;
pub mod draw;
pub mod geometry;
