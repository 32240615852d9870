//! Euclidean geometry over coordinate slices

use crate::point::LabeledPoint;

/// Euclidean distance between two coordinate slices.
///
/// Both slices must have the same length; input validation guarantees this
/// for every call made by the optimizer.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "vector dimension mismatch: {} vs {}",
        a.len(),
        b.len()
    );

    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = (x - y).abs();
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Per-axis arithmetic mean of a non-empty point set.
pub fn centroid(points: &[LabeledPoint]) -> Vec<f64> {
    let dim = points.first().map_or(0, LabeledPoint::dimension);
    let mut center = vec![0.0; dim];
    for point in points {
        for (c, v) in center.iter_mut().zip(&point.coordinates) {
            *c += v;
        }
    }
    let n = points.len() as f64;
    center.iter_mut().for_each(|c| *c /= n);
    center
}

/// Mean distance from every point to the centroid.
pub fn average_radius(points: &[LabeledPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let center = centroid(points);
    let total: f64 = points
        .iter()
        .map(|p| distance(&center, &p.coordinates))
        .sum();
    total / points.len() as f64
}
