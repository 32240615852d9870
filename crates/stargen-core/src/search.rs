//! Per-point candidate move search
//!
//! Each sweep tries, for one point at a time, staying put or stepping by the
//! current increment along a single output axis in either direction. The move
//! that minimizes the point's local error wins.

use crate::metric::pair_error;
use crate::point::LabeledPoint;
use serde::{Deserialize, Serialize};

/// A candidate move for one output point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Keep the current position
    Stay,
    /// Step by one increment along `axis` (zero-based)
    Step { axis: usize, positive: bool },
}

impl Move {
    /// All `2 * dim + 1` moves in search order: `0, -1, +1, -2, +2, ...`.
    ///
    /// The order is the tie-break: an earlier move keeps the win on equal
    /// error, so staying put beats any move that does no better.
    pub fn search_order(dim: usize) -> impl Iterator<Item = Move> {
        std::iter::once(Move::Stay).chain((0..dim).flat_map(|axis| {
            [
                Move::Step {
                    axis,
                    positive: false,
                },
                Move::Step {
                    axis,
                    positive: true,
                },
            ]
        }))
    }

    /// Signed one-based option number (`0` for stay, `-2` for a negative
    /// step on the second axis).
    pub fn option(&self) -> i64 {
        match *self {
            Move::Stay => 0,
            Move::Step { axis, positive } => {
                let n = axis as i64 + 1;
                if positive {
                    n
                } else {
                    -n
                }
            }
        }
    }

    /// Coordinates after applying this move with step size `increment`.
    pub fn apply(&self, coordinates: &[f64], increment: f64) -> Vec<f64> {
        let mut moved = coordinates.to_vec();
        if let Move::Step { axis, positive } = *self {
            if positive {
                moved[axis] += increment;
            } else {
                moved[axis] -= increment;
            }
        }
        moved
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Stay => write!(f, "stay"),
            Move::Step { positive: true, .. } => write!(f, "+{}", self.option()),
            Move::Step { .. } => write!(f, "{}", self.option()),
        }
    }
}

/// Average pair error between point `index` placed at `coordinates` and
/// every other output point at its current position.
pub fn local_error(
    index: usize,
    coordinates: &[f64],
    output: &[LabeledPoint],
    input: &[LabeledPoint],
) -> f64 {
    let true_coords = &input[index].coordinates;
    let total: f64 = output
        .iter()
        .zip(input)
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, (out, inp))| {
            pair_error(coordinates, &out.coordinates, true_coords, &inp.coordinates)
        })
        .sum();
    total / (output.len() - 1) as f64
}

/// Outcome of searching all moves for one point
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub chosen: Move,
    /// Coordinates after the chosen move
    pub coordinates: Vec<f64>,
    /// Local error at the chosen position
    pub error: f64,
    /// Local error had the point stayed put
    pub stay_error: f64,
}

/// Find the best move for point `index` with step size `increment`.
pub fn best_move(
    index: usize,
    output: &[LabeledPoint],
    input: &[LabeledPoint],
    increment: f64,
) -> Selection {
    let current = &output[index].coordinates;
    let stay_error = local_error(index, current, output, input);

    let mut selection = Selection {
        chosen: Move::Stay,
        coordinates: current.clone(),
        error: stay_error,
        stay_error,
    };

    for candidate in Move::search_order(current.len()).skip(1) {
        let coordinates = candidate.apply(current, increment);
        let error = local_error(index, &coordinates, output, input);
        if error < selection.error {
            selection.chosen = candidate;
            selection.coordinates = coordinates;
            selection.error = error;
        }
    }

    selection
}
