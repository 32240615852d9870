//! Per-run embedding state
//!
//! An [`Embedding`] owns the output points and the scalar annealing state of
//! a single run and borrows the input points read-only. Nothing here is
//! shared between runs.

use crate::error::{EmbedError, EmbedResult};
use crate::geometry::{average_radius, distance};
use crate::metric::{aggregate_error, pair_errors};
use crate::point::LabeledPoint;
use crate::precision::{distinguishable, estimate_precision};
use crate::search::{best_move, Selection};
use rand::Rng;
use tracing::debug;

/// What the annealing step decided after a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anneal {
    /// Error moved; keep the current increment
    Continue,
    /// Error stagnated; the increment was divided by 10
    Shrunk,
    /// Error stagnated and a smaller increment would be lost to rounding
    Converged,
}

/// Check that `input` can be embedded and return its dimensionality.
pub fn validate_input(input: &[LabeledPoint]) -> EmbedResult<usize> {
    if input.len() < 2 {
        return Err(EmbedError::TooFewPoints { count: input.len() });
    }

    let dim = input[0].dimension();
    for point in input {
        if point.coordinates.is_empty() {
            return Err(EmbedError::EmptyCoordinates {
                name: point.name.clone(),
            });
        }
        if point.dimension() != dim {
            return Err(EmbedError::DimensionMismatch {
                name: point.name.clone(),
                expected: dim,
                found: point.dimension(),
            });
        }
        if let Some(axis) = point.coordinates.iter().position(|v| !v.is_finite()) {
            return Err(EmbedError::NonFiniteCoordinate {
                name: point.name.clone(),
                axis,
            });
        }
    }

    for (i, a) in input.iter().enumerate() {
        if let Some(b) = input[i + 1..]
            .iter()
            .find(|b| !(distance(&a.coordinates, &b.coordinates) > 0.0))
        {
            return Err(EmbedError::CoincidentPoints {
                first: a.name.clone(),
                second: b.name.clone(),
            });
        }
    }

    Ok(dim)
}

/// Mutable state of one embedding run
#[derive(Debug, Clone)]
pub struct Embedding<'a> {
    input: &'a [LabeledPoint],
    output: Vec<LabeledPoint>,
    average_radius: f64,
    increment: f64,
    precision: usize,
    last_error: Option<f64>,
}

impl<'a> Embedding<'a> {
    /// Validate `input` and scatter its points uniformly inside
    /// `[-r, r]^output_dimension`, where `r` is the input's average radius.
    pub fn new<R: Rng>(
        input: &'a [LabeledPoint],
        output_dimension: usize,
        rng: &mut R,
    ) -> EmbedResult<Self> {
        if output_dimension == 0 {
            return Err(EmbedError::InvalidOutputDimension);
        }
        validate_input(input)?;

        let radius = average_radius(input);
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EmbedError::DegenerateGeometry { radius });
        }

        let output = input
            .iter()
            .map(|p| {
                let coordinates = (0..output_dimension)
                    .map(|_| rng.gen_range(-radius..=radius))
                    .collect::<Vec<_>>();
                LabeledPoint::new(p.name.clone(), coordinates)
            })
            .collect();

        Ok(Self {
            input,
            output,
            average_radius: radius,
            increment: radius,
            precision: estimate_precision(input),
            last_error: None,
        })
    }

    /// Move every point once, in index order.
    ///
    /// Later points see the already-moved positions of earlier ones.
    pub fn sweep(&mut self) {
        self.sweep_with(|_, _| {});
    }

    /// Like [`sweep`](Self::sweep), handing each point's selection to
    /// `inspect` before it is applied.
    pub fn sweep_with(&mut self, mut inspect: impl FnMut(usize, &Selection)) {
        for index in 0..self.output.len() {
            let selection = best_move(index, &self.output, self.input, self.increment);
            inspect(index, &selection);
            self.output[index].coordinates = selection.coordinates;
        }
    }

    /// Record the error after a sweep and shrink or stop on stagnation.
    ///
    /// Stagnation means `|last - error| <= tolerance`; with a tolerance of
    /// zero this is exact float equality. The first call never stagnates.
    pub fn anneal(&mut self, error: f64, tolerance: f64) -> Anneal {
        let stagnant = self
            .last_error
            .is_some_and(|last| (last - error).abs() <= tolerance);
        self.last_error = Some(error);

        if !stagnant {
            return Anneal::Continue;
        }

        let next = self.increment / 10.0;
        if distinguishable(
            self.average_radius + next,
            self.average_radius,
            self.precision,
        ) {
            debug!(
                "error stagnated at {}, increment {} -> {}",
                error, self.increment, next
            );
            self.increment = next;
            Anneal::Shrunk
        } else {
            Anneal::Converged
        }
    }

    pub fn input(&self) -> &[LabeledPoint] {
        self.input
    }

    pub fn points(&self) -> &[LabeledPoint] {
        &self.output
    }

    pub fn into_points(self) -> Vec<LabeledPoint> {
        self.output
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Override the estimated working precision (clamped to at least 1).
    pub fn set_precision(&mut self, digits: usize) {
        self.precision = digits.max(1);
    }

    pub fn average_radius(&self) -> f64 {
        self.average_radius
    }

    /// Mean relative error over every pair
    pub fn aggregate_error(&self) -> f64 {
        aggregate_error(&self.output, self.input)
    }

    /// Relative error of every pair in canonical order
    pub fn pair_errors(&self) -> Vec<f64> {
        pair_errors(&self.output, self.input)
    }
}
