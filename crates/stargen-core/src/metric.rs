//! Relative distance error between an embedding and its source points
//!
//! All functions here are pure: scoring the same output against the same
//! input always produces bit-identical values.

use crate::geometry::distance;
use crate::point::LabeledPoint;

/// Relative error of one embedded distance.
///
/// `out_a`/`out_b` are embedded coordinates, `true_a`/`true_b` the source
/// coordinates. The true distance must be non-zero; validation rejects
/// coincident inputs before any scoring happens.
pub fn pair_error(out_a: &[f64], out_b: &[f64], true_a: &[f64], true_b: &[f64]) -> f64 {
    let real = distance(true_a, true_b);
    let embedded = distance(out_a, out_b);
    (real - embedded).abs() / real
}

/// Number of unordered pairs among `n` points.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Iterate `(i, j)` with `i < j`, increasing `i` then increasing `j`.
pub fn canonical_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Errors for every pair in canonical order.
pub fn pair_errors(output: &[LabeledPoint], input: &[LabeledPoint]) -> Vec<f64> {
    canonical_pairs(output.len())
        .map(|(i, j)| {
            pair_error(
                &output[i].coordinates,
                &output[j].coordinates,
                &input[i].coordinates,
                &input[j].coordinates,
            )
        })
        .collect()
}

/// Mean of all pair errors: the stress of the whole embedding.
pub fn aggregate_error(output: &[LabeledPoint], input: &[LabeledPoint]) -> f64 {
    let pairs = pair_count(output.len());
    if pairs == 0 {
        return 0.0;
    }
    pair_errors(output, input).iter().sum::<f64>() / pairs as f64
}

/// Per-point error derived from a canonical pair error list.
///
/// Each point's value is the sum of its incident pair errors divided by
/// `n - 1`. Returns `None` when `pair_errors` is not exactly
/// `pair_count(n)` long.
pub fn point_errors(n: usize, pair_errors: &[f64]) -> Option<Vec<f64>> {
    if n < 2 || pair_errors.len() != pair_count(n) {
        return None;
    }

    let mut totals = vec![0.0; n];
    for ((i, j), e) in canonical_pairs(n).zip(pair_errors) {
        totals[i] += e;
        totals[j] += e;
    }
    let neighbours = (n - 1) as f64;
    totals.iter_mut().for_each(|t| *t /= neighbours);
    Some(totals)
}
