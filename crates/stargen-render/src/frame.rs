//! Map embedding coordinates onto pixels
//!
//! The frame keeps a margin of 15% of the image width (clamped to
//! 60..=150 px) on every side, scales the horizontal extent of the points to
//! fill the remaining width, and infers the image height from the vertical
//! extent at the same scale.

use crate::error::{RenderError, RenderResult};
use stargen_core::LabeledPoint;

/// Tallest image the frame will lay out, in pixels
pub const MAX_HEIGHT: u32 = 32_768;

/// Pixel layout of a planar point set
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    /// World units per pixel
    pub scale: f64,
    center: (f64, f64),
}

/// Margin for an image `width` pixels wide.
pub fn margin_for(width: u32) -> u32 {
    let margin = (0.15 * width as f64).round() as u32;
    margin.clamp(60, 150)
}

impl Frame {
    /// Fit `points` into an image `width` pixels wide.
    ///
    /// `extent` overrides the world-space width and height that should fill
    /// the frame, which keeps the scale fixed across several renders.
    pub fn fit(
        points: &[LabeledPoint],
        width: u32,
        extent: Option<(f64, f64)>,
    ) -> RenderResult<Self> {
        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for point in points {
            let (x, y) = planar(point)?;
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
        if points.is_empty() {
            return Err(RenderError::EmptyExtent);
        }

        let margin = margin_for(width);
        let inner = width as i64 - 2 * margin as i64;
        if inner <= 0 {
            return Err(RenderError::TooNarrow { width, margin });
        }

        let (extent_width, extent_height) = extent.unwrap_or((max.0 - min.0, max.1 - min.1));
        if !(extent_width.is_finite() && extent_width > 0.0) {
            return Err(RenderError::EmptyExtent);
        }
        if !(extent_height.is_finite() && extent_height >= 0.0) {
            return Err(RenderError::EmptyExtent);
        }

        let scale = extent_width / inner as f64;
        let height = (extent_height / scale).round() + 2.0 * margin as f64;
        if !(height.is_finite() && height <= MAX_HEIGHT as f64) {
            return Err(RenderError::ImageTooTall {
                height,
                max: MAX_HEIGHT,
            });
        }
        let height = height as u32;

        Ok(Self {
            width,
            height,
            margin,
            scale,
            center: ((min.0 + max.0) / 2.0, (min.1 + max.1) / 2.0),
        })
    }

    /// Pixel position of world coordinates `(x, y)`.
    pub fn to_pixels(&self, x: f64, y: f64) -> (i32, i32) {
        let mid_x = self.width as f64 / 2.0;
        let mid_y = self.height as f64 / 2.0;
        let px = mid_x + ((x - self.center.0) / self.scale).round();
        let py = mid_y + ((y - self.center.1) / self.scale).round();
        (px.round() as i32, py.round() as i32)
    }

    /// Pixel position of a planar point.
    pub fn point_pixels(&self, point: &LabeledPoint) -> RenderResult<(i32, i32)> {
        let (x, y) = planar(point)?;
        Ok(self.to_pixels(x, y))
    }

    /// Length in pixels of one world unit.
    pub fn unit_length(&self) -> i32 {
        (1.0 / self.scale).round() as i32
    }
}

fn planar(point: &LabeledPoint) -> RenderResult<(f64, f64)> {
    match point.coordinates.as_slice() {
        [x, y] => Ok((*x, *y)),
        other => Err(RenderError::NotTwoDimensional {
            name: point.name.clone(),
            found: other.len(),
        }),
    }
}
