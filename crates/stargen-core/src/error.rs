//! Embedding error types

use thiserror::Error;

/// Errors that can occur before an embedding run starts.
///
/// Every variant is raised during input validation; once a run has begun the
/// sweep loop itself cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmbedError {
    /// Pairwise error needs at least two points
    #[error("need at least 2 points, got {count}")]
    TooFewPoints { count: usize },

    /// A point without coordinates
    #[error("point '{name}' has no coordinates")]
    EmptyCoordinates { name: String },

    /// Points of inconsistent dimensionality
    #[error("point '{name}' has {found} coordinates, expected {expected}")]
    DimensionMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// NaN or infinite coordinate
    #[error("point '{name}' has a non-finite value on axis {axis}")]
    NonFiniteCoordinate { name: String, axis: usize },

    /// Two input points share coordinates, so their true distance is zero
    #[error("points '{first}' and '{second}' coincide")]
    CoincidentPoints { first: String, second: String },

    /// Output dimension of zero
    #[error("output dimension must be at least 1")]
    InvalidOutputDimension,

    /// Average radius of the input set is not strictly positive
    #[error("degenerate input geometry: average radius {radius}")]
    DegenerateGeometry { radius: f64 },

    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for embedding operations
pub type EmbedResult<T> = Result<T, EmbedError>;
