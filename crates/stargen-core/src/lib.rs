//! stargen core engine
//!
//! Projects labeled points from a high-dimensional space into a
//! lower-dimensional one while keeping pairwise distances as close as
//! possible. The optimizer repeatedly nudges one point at a time along a
//! single axis, keeps whichever move lowers that point's relative distance
//! error, and anneals the step size by factors of ten until a smaller step
//! would no longer register at the input's working precision.
//!
//! # Features
//!
//! - `parallel` - Run independent restarts on a rayon pool
//!
//! # Example
//!
//! ```rust
//! use stargen_core::{run, LabeledPoint, Termination};
//!
//! let stars = vec![
//!     LabeledPoint::new("Sol", vec![0.0, 0.0, 0.0]),
//!     LabeledPoint::new("Sirius", vec![-1.612, 8.078, -2.474]),
//!     LabeledPoint::new("Procyon", vec![-4.769, 10.31, 1.039]),
//! ];
//! let result = run(&stars, 100, 2, true, 0).unwrap();
//! assert_eq!(result.pair_errors.map(|e| e.len()), Some(3));
//! assert!(result.iterations <= 100);
//! ```

pub mod embedding;
pub mod error;
pub mod geometry;
pub mod metric;
pub mod optimizer;
pub mod point;
pub mod precision;
pub mod progress;
mod restarts;
pub mod search;

// Re-export main types at crate root
pub use embedding::{validate_input, Anneal, Embedding};
pub use error::{EmbedError, EmbedResult};
pub use metric::{aggregate_error, canonical_pairs, pair_count, pair_errors, point_errors};
pub use optimizer::{run, Optimizer, OptimizerConfig, RunResult, Termination};
pub use point::LabeledPoint;
pub use progress::{CancelToken, Progress, ProgressObserver, Silent, TracingProgress};
pub use restarts::run_restarts;
pub use search::{Move, Selection};
