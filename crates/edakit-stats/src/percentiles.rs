//! Order statistics on sorted samples.

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the closest ranks: the `p`-th percentile
/// of `n` values sits at fractional rank `h = (n - 1) * p / 100`, and the result
/// is `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
///
/// `percentile` is clamped to `0.0..=100.0`. Returns `f64::NAN` for empty input.
///
/// # Examples
///
/// ```
/// use edakit_stats::percentiles::compute_percentile;
///
/// let values = vec![10.0, 10.0, 10.0, 12.0, 14.0, 18.0, 20.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 12.0);
/// assert_eq!(compute_percentile(&values, 75.0), 16.0);
/// assert_eq!(compute_percentile(&[1.0, 2.0], 50.0), 1.5);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(&last) = sorted_values.last() else {
        return f64::NAN;
    };
    let rank = (sorted_values.len() - 1) as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = rank.floor() as usize;
    if lower + 1 >= sorted_values.len() {
        return last;
    }
    let fraction = rank - rank.floor();
    let (lo, hi) = (sorted_values[lower], sorted_values[lower + 1]);
    if fraction > 0.0 {
        lo + fraction * (hi - lo)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_single_value() {
        for p in [0.0, 25.0, 50.0, 100.0] {
            assert_eq!(compute_percentile(&[7.0], p), 7.0);
        }
    }

    #[test]
    fn test_extremes() {
        let values = [1.0, 4.0, 9.0];
        assert_eq!(compute_percentile(&values, 0.0), 1.0);
        assert_eq!(compute_percentile(&values, 100.0), 9.0);
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(compute_percentile(&values, 25.0), 4.0);
        assert_eq!(compute_percentile(&values, 50.0), 4.5);
        assert_eq!(compute_percentile(&values, 75.0), 5.5);
    }
}
