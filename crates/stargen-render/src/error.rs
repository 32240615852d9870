//! Render error types

use thiserror::Error;

/// Errors that can occur while laying out or painting a scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// Only planar embeddings can be drawn
    #[error("point '{name}' has {found} coordinates, renderer needs 2")]
    NotTwoDimensional { name: String, found: usize },

    /// Pair error list does not match the point count
    #[error("expected {expected} pair errors, got {found}")]
    PairErrorCount { expected: usize, found: usize },

    /// Nothing to scale: no points, zero horizontal extent, or a height
    /// that is negative or not finite
    #[error("cannot scale an empty, zero-width or non-finite extent")]
    EmptyExtent,

    /// Inferred image height exceeds the layout limit
    #[error("inferred image height {height} exceeds {max}px")]
    ImageTooTall { height: f64, max: u32 },

    /// Image too narrow for its own margins
    #[error("image width {width} leaves no room inside {margin}px margins")]
    TooNarrow { width: u32, margin: u32 },

    /// File extension without a backend
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Color name or hex code that could not be parsed
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// Backend failure while painting
    #[error("drawing failed: {0}")]
    Drawing(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
