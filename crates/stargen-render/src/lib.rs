//! stargen renderer
//!
//! Draws a planar embedding as an image: one labeled disc per point, an
//! optional set of error indicators, and a one-unit scale bar. Layout is
//! done up front into a [`Scene`] of pixel-space [`DrawCommand`]s, which
//! plotters then paints to SVG or a bitmap.
//!
//! # Example
//!
//! ```rust
//! use stargen_core::LabeledPoint;
//! use stargen_render::{render_svg_string, Indicator, RenderOptions, Rgb, Scene};
//!
//! let points = vec![
//!     LabeledPoint::new("Sol", vec![0.0, 0.0]),
//!     LabeledPoint::new("Sirius", vec![8.0, 2.5]),
//!     LabeledPoint::new("Procyon", vec![3.0, 10.0]),
//! ];
//! let options = RenderOptions {
//!     indicators: vec![Indicator::Halo { color: Rgb::GRAY }],
//!     ..Default::default()
//! };
//! let scene = Scene::build(&points, &[0.01, 0.2, 0.05], &options).unwrap();
//! let svg = render_svg_string(&scene).unwrap();
//! assert!(svg.contains("Sirius"));
//! ```

pub mod color;
pub mod error;
pub mod frame;
pub mod paint;
pub mod scene;

pub use color::Rgb;
pub use error::{RenderError, RenderResult};
pub use frame::{margin_for, Frame, MAX_HEIGHT};
pub use paint::{render_svg_string, render_to_file, ImageFormat};
pub use scene::{format_error, DrawCommand, Indicator, RenderOptions, Scene};
