//! Working precision heuristics
//!
//! The optimizer decides when shrinking the step size stops mattering by
//! comparing values rounded to a number of significant figures. That number
//! is estimated once from the input data: the average count of significant
//! digits across every input coordinate.

use crate::point::LabeledPoint;

/// Significant digits carried by a single coordinate value.
///
/// - `0` counts as one digit
/// - integer multiples of 10 drop their trailing zeros (`1200` → 2)
/// - anything else counts the digits of its shortest round-trip decimal
///   rendering, ignoring sign and decimal point (`-1.643` → 4)
pub fn significant_digits(value: f64) -> usize {
    if value == 0.0 {
        return 1;
    }

    if value.fract() == 0.0 && value % 10.0 == 0.0 {
        let mut n = value.abs();
        while n % 10.0 == 0.0 {
            n /= 10.0;
        }
        return count_digits(&format!("{}", n));
    }

    count_digits(&format!("{}", value))
}

fn count_digits(rendered: &str) -> usize {
    rendered.chars().filter(char::is_ascii_digit).count()
}

/// Average significant digit count over every coordinate of `points`,
/// rounded half away from zero and never less than 1.
pub fn estimate_precision(points: &[LabeledPoint]) -> usize {
    let (total, count) = points
        .iter()
        .flat_map(|p| p.coordinates.iter())
        .fold((0usize, 0usize), |(total, count), &v| {
            (total + significant_digits(v), count + 1)
        });

    if count == 0 {
        return 1;
    }

    let average = total as f64 / count as f64;
    (average.round() as usize).max(1)
}

/// Round `value` to `digits` significant decimal figures.
///
/// Rounding happens on the exact decimal expansion of `value`, the same way a
/// decimal context of that precision rounds.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let digits = digits.max(1);
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Whether `a` and `b` remain different once rounded to `digits`
/// significant figures.
pub fn distinguishable(a: f64, b: f64, digits: usize) -> bool {
    round_significant(a, digits) != round_significant(b, digits)
}
