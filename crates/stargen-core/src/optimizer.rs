//! Stress-minimizing optimizer
//!
//! Drives an [`Embedding`] through repeated sweeps until the step size can no
//! longer shrink in a way that matters at the input's working precision, the
//! iteration cap is hit, or the run is cancelled.
//!
//! # Example
//!
//! ```rust
//! use stargen_core::{LabeledPoint, Optimizer, OptimizerConfig};
//!
//! let input = vec![
//!     LabeledPoint::new("a", vec![0.0, 0.0, 0.0]),
//!     LabeledPoint::new("b", vec![3.0, 0.0, 0.0]),
//!     LabeledPoint::new("c", vec![0.0, 4.0, 0.0]),
//! ];
//! let config = OptimizerConfig {
//!     max_iterations: 200,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let result = Optimizer::new(config).run(&input).unwrap();
//! assert_eq!(result.points.len(), 3);
//! assert!(result.pair_errors.is_none());
//! ```

use crate::embedding::{Anneal, Embedding};
use crate::error::{EmbedError, EmbedResult};
use crate::point::LabeledPoint;
use crate::progress::{CancelToken, Progress, ProgressObserver, Silent, TracingProgress};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Optimizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Upper bound on sweeps (default: 500)
    pub max_iterations: usize,
    /// Dimensionality of the output points (default: 2)
    pub output_dimension: usize,
    /// Return the per-pair error list alongside the points (default: false)
    pub want_pair_errors: bool,
    /// Report progress every this many iterations, 0 disables (default: 0)
    pub progress_every: usize,
    /// Seed for the initial placement; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Largest error change still treated as stagnation (default: 0.0, exact)
    pub stagnation_tolerance: f64,
    /// Significant figures for the convergence test; estimated from the
    /// input when absent
    pub precision: Option<usize>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            output_dimension: 2,
            want_pair_errors: false,
            progress_every: 0,
            seed: None,
            stagnation_tolerance: 0.0,
            precision: None,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> EmbedResult<()> {
        if self.output_dimension == 0 {
            return Err(EmbedError::InvalidOutputDimension);
        }
        if !(self.stagnation_tolerance.is_finite() && self.stagnation_tolerance >= 0.0) {
            return Err(EmbedError::InvalidConfig(format!(
                "stagnation tolerance must be finite and non-negative, got {}",
                self.stagnation_tolerance
            )));
        }
        if self.precision == Some(0) {
            return Err(EmbedError::InvalidConfig(
                "precision must be at least 1 significant figure".to_string(),
            ));
        }
        Ok(())
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Further step shrinkage would not be distinguishable at working precision
    Converged,
    /// The iteration cap was reached first
    IterationsExhausted,
    /// The cancel token was set
    Cancelled,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::IterationsExhausted => write!(f, "iterations exhausted"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Final state of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Embedded points, same names and order as the input
    pub points: Vec<LabeledPoint>,
    /// Per-pair errors in canonical order, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_errors: Option<Vec<f64>>,
    pub termination: Termination,
    /// Completed sweeps
    pub iterations: usize,
    /// Mean pair error of `points`
    pub aggregate_error: f64,
    /// Step size at termination
    pub increment: f64,
    /// Significant figures used for the convergence test
    pub precision: usize,
    /// Seed of the initial placement
    pub seed: u64,
}

/// Stress-minimizing optimizer
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
    cancel: Option<CancelToken>,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop at the next iteration boundary once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run without progress reporting.
    pub fn run(&self, input: &[LabeledPoint]) -> EmbedResult<RunResult> {
        self.run_with_progress(input, &mut Silent)
    }

    /// Run, handing a [`Progress`] to `observer` before every
    /// `progress_every`-th sweep.
    pub fn run_with_progress(
        &self,
        input: &[LabeledPoint],
        observer: &mut dyn ProgressObserver,
    ) -> EmbedResult<RunResult> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut embedding = Embedding::new(input, self.config.output_dimension, &mut rng)?;
        if let Some(digits) = self.config.precision {
            embedding.set_precision(digits);
        }

        let every = self.config.progress_every;
        let mut termination = Termination::IterationsExhausted;
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            if self.is_cancelled() {
                termination = Termination::Cancelled;
                break;
            }

            if every > 0 && iterations % every == 0 {
                observer.on_progress(&Progress {
                    iteration: iterations,
                    aggregate_error: embedding.aggregate_error(),
                    increment: embedding.increment(),
                });
            }

            embedding.sweep();
            iterations += 1;

            let error = embedding.aggregate_error();
            if embedding.anneal(error, self.config.stagnation_tolerance) == Anneal::Converged {
                termination = Termination::Converged;
                break;
            }
        }

        let aggregate_error = embedding.aggregate_error();
        match termination {
            Termination::Converged => info!(
                "Converged on an error of {} after {} iterations.",
                aggregate_error, iterations
            ),
            Termination::IterationsExhausted => info!(
                "Reached an error of {} after {} iterations.",
                aggregate_error, iterations
            ),
            Termination::Cancelled => info!(
                "Cancelled with an error of {} after {} iterations.",
                aggregate_error, iterations
            ),
        }

        let pair_errors = self
            .config
            .want_pair_errors
            .then(|| embedding.pair_errors());

        Ok(RunResult {
            increment: embedding.increment(),
            precision: embedding.precision(),
            points: embedding.into_points(),
            pair_errors,
            termination,
            iterations,
            aggregate_error,
            seed,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Embed `input` into `output_dimension` dimensions in one call.
///
/// Progress is logged through `tracing` every `progress_every` iterations;
/// `0` disables it.
pub fn run(
    input: &[LabeledPoint],
    max_iterations: usize,
    output_dimension: usize,
    want_pair_errors: bool,
    progress_every: usize,
) -> EmbedResult<RunResult> {
    let config = OptimizerConfig {
        max_iterations,
        output_dimension,
        want_pair_errors,
        progress_every,
        ..Default::default()
    };
    Optimizer::new(config).run_with_progress(input, &mut TracingProgress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn right_triangle() -> Vec<LabeledPoint> {
        vec![
            LabeledPoint::new("a", vec![0.0, 0.0, 0.0]),
            LabeledPoint::new("b", vec![3.0, 0.0, 0.0]),
            LabeledPoint::new("c", vec![0.0, 4.0, 0.0]),
        ]
    }

    fn seeded(seed: u64) -> OptimizerConfig {
        OptimizerConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.output_dimension, 2);
        assert!(!config.want_pair_errors);
        assert_eq!(config.progress_every, 0);
        assert_eq!(config.stagnation_tolerance, 0.0);
        assert_eq!(config.precision, None);
    }

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let config: OptimizerConfig =
            serde_json::from_str(r#"{"output_dimension": 3, "seed": 9}"#).unwrap();
        assert_eq!(config.output_dimension, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_iterations, 500);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let config = OptimizerConfig {
            stagnation_tolerance: -1.0,
            ..Default::default()
        };
        let result = Optimizer::new(config).run(&right_triangle());
        assert!(matches!(result, Err(EmbedError::InvalidConfig(_))));
    }

    #[test]
    fn zero_precision_is_rejected() {
        let config = OptimizerConfig {
            precision: Some(0),
            ..Default::default()
        };
        let result = Optimizer::new(config).run(&right_triangle());
        assert!(matches!(result, Err(EmbedError::InvalidConfig(_))));
    }

    #[test]
    fn precision_override_is_reported() {
        let config = OptimizerConfig {
            max_iterations: 3,
            precision: Some(7),
            ..seeded(8)
        };
        let result = Optimizer::new(config).run(&right_triangle()).unwrap();
        assert_eq!(result.precision, 7);

        let estimated = Optimizer::new(seeded(8)).run(&right_triangle()).unwrap();
        assert_eq!(estimated.precision, 1);
    }

    #[test]
    fn zero_iterations_keeps_initial_placement() {
        let config = OptimizerConfig {
            max_iterations: 0,
            ..seeded(5)
        };
        let input = right_triangle();
        let result = Optimizer::new(config).run(&input).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let initial = Embedding::new(&input, 2, &mut rng).unwrap();

        assert_eq!(result.termination, Termination::IterationsExhausted);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.points, initial.points());
        assert_eq!(result.aggregate_error, initial.aggregate_error());
        assert_eq!(result.increment, initial.average_radius());
    }

    #[test]
    fn progress_reported_on_schedule() {
        let config = OptimizerConfig {
            max_iterations: 10,
            progress_every: 3,
            stagnation_tolerance: 0.0,
            ..seeded(1)
        };
        let mut seen = Vec::new();
        let result = Optimizer::new(config)
            .run_with_progress(&right_triangle(), &mut |p: &Progress| {
                seen.push(p.iteration)
            })
            .unwrap();

        let expected: Vec<usize> = (0..result.iterations).filter(|i| i % 3 == 0).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let result = Optimizer::new(seeded(2))
            .with_cancel(token)
            .run(&right_triangle())
            .unwrap();
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn cancel_from_observer_stops_next_iteration() {
        let token = CancelToken::new();
        let handle = token.clone();
        let config = OptimizerConfig {
            max_iterations: 1000,
            progress_every: 1,
            ..seeded(4)
        };
        let result = Optimizer::new(config)
            .with_cancel(token)
            .run_with_progress(&right_triangle(), &mut |p: &Progress| {
                if p.iteration == 0 {
                    handle.cancel();
                }
            })
            .unwrap();
        // the sweep that was about to start still completes
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn termination_serializes_snake_case() {
        let json = serde_json::to_string(&Termination::IterationsExhausted).unwrap();
        assert_eq!(json, "\"iterations_exhausted\"");
        assert_eq!(Termination::Converged.to_string(), "converged");
    }
}
