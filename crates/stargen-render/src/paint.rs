//! Paint a [`Scene`] with plotters
//!
//! SVG goes through `SVGBackend`; png, bmp and jpg through `BitMapBackend`.
//! The scene is backend-independent so both share one drawing pass.

use crate::color::Rgb;
use crate::error::{RenderError, RenderResult};
use crate::scene::{DrawCommand, Scene};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};

const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f64 = 12.0;

/// Output format picked from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Bitmap,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" | "bmp" | "jpg" | "jpeg" => Ok(ImageFormat::Bitmap),
            _ => Err(RenderError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Paint `scene` to `path`, choosing the backend by extension.
pub fn render_to_file(scene: &Scene, path: &Path) -> RenderResult<()> {
    let format = ImageFormat::from_path(path)?;
    let size = (scene.width, scene.height);
    debug!(
        "Painting {} commands at {}x{} as {:?}",
        scene.commands.len(),
        size.0,
        size.1,
        format
    );

    match format {
        ImageFormat::Svg => paint(scene, SVGBackend::new(path, size).into_drawing_area())?,
        ImageFormat::Bitmap => {
            paint(scene, BitMapBackend::new(path, size).into_drawing_area())?
        }
    }

    info!("Wrote {}", path.display());
    Ok(())
}

/// Paint `scene` into an SVG document held in memory.
pub fn render_svg_string(scene: &Scene) -> RenderResult<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (scene.width, scene.height))
            .into_drawing_area();
        paint(scene, root)?;
    }
    Ok(buffer)
}

fn paint<DB: DrawingBackend>(scene: &Scene, root: DrawingArea<DB, Shift>) -> RenderResult<()> {
    root.fill(&rgb(scene.background)).map_err(drawing)?;

    for command in &scene.commands {
        let drawn = match command {
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => root.draw(&Circle::new(*center, *radius, rgb(*color).filled())),
            DrawCommand::Segment { from, to, color } => {
                root.draw(&PathElement::new(vec![*from, *to], rgb(*color)))
            }
            DrawCommand::Label { text, at, color } => {
                let style = (FONT_FAMILY, FONT_SIZE)
                    .into_font()
                    .color(&rgb(*color));
                root.draw(&Text::new(text.as_str(), *at, style))
            }
        };
        drawn.map_err(drawing)?;
    }

    root.present().map_err(drawing)
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn drawing(e: impl std::fmt::Display) -> RenderError {
    RenderError::Drawing(e.to_string())
}
