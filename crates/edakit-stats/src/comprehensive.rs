use crate::{
    boxplot::BoxSummary,
    descriptive::DescriptiveStats,
    histogram::{Binning, Histogram},
};

/// Everything needed to draw a distribution: descriptive statistics, a box
/// summary and a histogram.
///
/// Non-finite values are dropped before anything is computed.
///
/// # Examples
///
/// ```
/// use edakit_stats::{comprehensive::ComprehensiveStats, histogram::Binning};
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let stats = ComprehensiveStats::new(&values, Binning::Count(5)).unwrap();
///
/// assert_eq!(stats.stats.mean, 5.5);
/// assert_eq!(stats.box_summary.median, 5.5);
/// assert_eq!(stats.histogram.bins.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ComprehensiveStats {
    pub stats: DescriptiveStats,
    pub box_summary: BoxSummary,
    pub histogram: Histogram,
}

impl ComprehensiveStats {
    /// Computes the summary from unsorted values.
    ///
    /// Returns `None` if no finite value remains.
    #[must_use]
    pub fn new(values: &[f64], binning: Binning) -> Option<Self> {
        let mut sorted = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, binning)
    }

    /// Computes the summary from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], binning: Binning) -> Option<Self> {
        let box_summary = BoxSummary::from_sorted(sorted_values)?;
        let stats = DescriptiveStats::from_sorted(sorted_values);
        let histogram = Histogram::from_sorted(sorted_values, binning);

        Some(Self {
            stats,
            box_summary,
            histogram,
        })
    }
}
