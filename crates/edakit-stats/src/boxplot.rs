use crate::percentiles::compute_percentile;

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary with mean and outliers, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub mean: f64,
    /// Lowest value not below `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Highest value not above `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    /// Values outside the whisker fences, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarizes the finite values of `values`; `None` if there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use edakit_stats::boxplot::BoxSummary;
    ///
    /// let summary = BoxSummary::new(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
    /// assert_eq!(summary.median, 3.0);
    /// assert_eq!(summary.whisker_high, 4.0);
    /// assert_eq!(summary.outliers, [100.0]);
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sorted = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Summarizes pre-sorted finite values.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let (&first, &last) = (sorted_values.first()?, sorted_values.last()?);

        let q1 = compute_percentile(sorted_values, 25.0);
        let median = compute_percentile(sorted_values, 50.0);
        let q3 = compute_percentile(sorted_values, 75.0);
        let mean = sorted_values.iter().sum::<f64>() / sorted_values.len() as f64;

        let iqr = q3 - q1;
        let lower_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let upper_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let whisker_low = sorted_values
            .iter()
            .copied()
            .find(|&v| v >= lower_fence)
            .unwrap_or(first);
        let whisker_high = sorted_values
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= upper_fence)
            .unwrap_or(last);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            mean,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Smallest and largest value drawn (whiskers or outliers).
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        let low = self.outliers.first().map_or(self.whisker_low, |v| v.min(self.whisker_low));
        let high = self.outliers.last().map_or(self.whisker_high, |v| v.max(self.whisker_high));
        (low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(BoxSummary::new(&[]).is_none());
        assert!(BoxSummary::new(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_reference_sample() {
        let summary = BoxSummary::new(&[10.0, 12.0, 14.0, 10.0, 18.0, 20.0, 10.0]).unwrap();
        assert_eq!(summary.q1, 10.0);
        assert_eq!(summary.median, 12.0);
        assert_eq!(summary.q3, 16.0);
        assert_eq!(summary.whisker_low, 10.0);
        assert_eq!(summary.whisker_high, 20.0);
        assert!(summary.outliers.is_empty());
        assert!((summary.mean - 94.0 / 7.0).abs() < 1e-12);
        assert_eq!(summary.extent(), (10.0, 20.0));
    }

    #[test]
    fn test_outliers_on_both_sides() {
        let summary = BoxSummary::new(&[-50.0, 4.0, 5.0, 5.0, 6.0, 6.0, 7.0, 80.0]).unwrap();
        assert_eq!(summary.outliers, [-50.0, 80.0]);
        assert_eq!(summary.whisker_low, 4.0);
        assert_eq!(summary.whisker_high, 7.0);
        assert_eq!(summary.extent(), (-50.0, 80.0));
    }

    #[test]
    fn test_single_value() {
        let summary = BoxSummary::new(&[3.0]).unwrap();
        assert_eq!(summary.iqr(), 0.0);
        assert_eq!((summary.whisker_low, summary.whisker_high), (3.0, 3.0));
    }
}
