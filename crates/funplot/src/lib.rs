//! Funplot - composable plots of functions, curves and point sets
//!
//! Plots are built from [`Drawable`]s: a [`Function`] sampled over a domain,
//! a [`Curve`] through explicit points, or unconnected [`Points`]. Drawables
//! combine with `+` into a [`DrawableGroup`], and a [`Scene`] adds
//! figure-level options (limits, labels, grid, legend) and renders, shows or
//! saves the result as SVG, PNG or JPEG.
//!
//! ```no_run
//! use funplot::{Curve, Function, Points, Scene};
//!
//! fn main() -> Result<(), funplot::FunplotError> {
//!     let parabola = Function::parse("x ** 2")?
//!         .with_domain((-2.0, 2.0, 50))?
//!         .with_label("x²");
//!     let chord = Curve::new(vec![-2.0, 2.0], vec![4.0, 4.0]).style_option("ls", "--")?;
//!     let roots = Points::new(vec![0.0], vec![0.0]).style_option("color", "black")?;
//!
//!     let scene = Scene::from(parabola + chord + roots)
//!         .title("A parabola")
//!         .grid(true)
//!         .legend(true);
//!
//!     scene.save("parabola.svg")?;
//!     scene.save("parabola.png")?;
//!     Ok(())
//! }
//! ```
//!
//! Rendering draws onto an explicit [`Figure`]; nothing is shared between
//! scenes, and each `save`/`show` call creates and drops its own figure.

pub mod config;
pub mod domain;
pub mod export;
pub mod style;

mod curve;
mod drawable;
mod error;
mod figure;
mod function;
mod points;
mod scene;
mod viewer;

pub use funplot_core::{axis, color, draw, geometry};
pub use funplot_expr::{DiagnosticError, Expr, ExprError, Span};

pub use curve::Curve;
pub use domain::{Domain, DomainError, linspace};
pub use drawable::{Drawable, DrawableGroup, Plottable, combine};
pub use error::{FunplotError, OptionError};
pub use export::{ImageFormat, SaveOptions};
pub use figure::{Figure, Series, SeriesKind};
pub use function::Function;
pub use points::Points;
pub use scene::{FigureOption, Scene};
