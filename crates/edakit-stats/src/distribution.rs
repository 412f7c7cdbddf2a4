use crate::special::regularized_incomplete_beta;

/// Fisher-Snedecor (F) distribution with `d1` numerator and `d2` denominator
/// degrees of freedom.
///
/// # Examples
///
/// ```
/// use edakit_stats::distribution::FisherSnedecor;
///
/// // with (2, 2) degrees of freedom the CDF is f / (1 + f)
/// let f = FisherSnedecor::new(2.0, 2.0);
/// assert!((f.cdf(4.0) - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherSnedecor {
    d1: f64,
    d2: f64,
}

impl FisherSnedecor {
    /// Creates the distribution. Non-positive degrees of freedom yield a
    /// distribution whose CDF is `NaN` everywhere.
    #[must_use]
    pub fn new(d1: f64, d2: f64) -> Self {
        Self { d1, d2 }
    }

    /// Cumulative distribution function `P(X <= f)`.
    ///
    /// `P(X <= f) = I_{d1 f / (d1 f + d2)}(d1 / 2, d2 / 2)`.
    #[must_use]
    pub fn cdf(&self, f: f64) -> f64 {
        let Self { d1, d2 } = *self;
        if d1 <= 0.0 || d2 <= 0.0 || f.is_nan() {
            return f64::NAN;
        }
        if f <= 0.0 {
            return 0.0;
        }
        if f.is_infinite() {
            return 1.0;
        }
        regularized_incomplete_beta(d1 * f / (d1 * f + d2), d1 / 2.0, d2 / 2.0)
    }

    /// Upper-tail probability `P(X > f)`, computed as `1 - cdf(f)`.
    #[must_use]
    pub fn sf(&self, f: f64) -> f64 {
        1.0 - self.cdf(f)
    }
}
