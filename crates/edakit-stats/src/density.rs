//! Gaussian kernel density estimation.

use std::f64::consts::PI;

/// Number of points used by [`GaussianKde::curve`] by default.
pub const DEFAULT_CURVE_POINTS: usize = 200;

/// Gaussian kernel density estimate with Scott's bandwidth.
///
/// # Examples
///
/// ```
/// use edakit_stats::density::GaussianKde;
///
/// let kde = GaussianKde::new(&[1.0, 2.0, 2.5, 3.0, 4.0]).unwrap();
/// assert!(kde.density(2.5) > kde.density(0.0));
///
/// // a constant sample has no density
/// assert!(GaussianKde::new(&[1.0, 1.0, 1.0]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Builds the estimate from the finite values of `values`.
    ///
    /// Returns `None` when fewer than two finite values remain or their
    /// standard deviation is zero.
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let points = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        let bandwidth = scott_bandwidth(&points);
        (bandwidth > 0.0 && bandwidth.is_finite()).then_some(Self { points, bandwidth })
    }

    /// Probability density at `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        let norm = self.points.len() as f64 * self.bandwidth * (2.0 * PI).sqrt();
        self.points
            .iter()
            .map(|p| {
                let z = (x - p) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            / norm
    }

    /// Samples the density at `num_points` evenly spaced positions spanning
    /// the range of the data.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn curve(&self, num_points: usize) -> Vec<(f64, f64)> {
        let (min, max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let steps = num_points.saturating_sub(1).max(1) as f64;
        (0..num_points)
            .map(|i| {
                let x = min + (max - min) * (i as f64) / steps;
                (x, self.density(x))
            })
            .collect()
    }

    /// Like [`curve`](Self::curve), with densities scaled to histogram counts
    /// (`density * n * bin_width`).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn count_curve(&self, num_points: usize, bin_width: f64) -> Vec<(f64, f64)> {
        let scale = self.points.len() as f64 * bin_width;
        self.curve(num_points)
            .into_iter()
            .map(|(x, y)| (x, y * scale))
            .collect()
    }
}

/// Scott's rule: `std(ddof = 1) * n^(-1/5)`. `NaN` for fewer than two values.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt() * n.powf(-0.2)
}
