use std::{f64::consts::PI, fmt, ops::Range, str::FromStr};

use crate::percentiles;

/// A histogram representation of a dataset's distribution.
///
/// Bins are equal-width and contiguous. Every bin is half-open except the
/// last one, which also includes its upper edge so that the maximum value is
/// counted. Non-finite values are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

/// Upper bound on the number of bins a [`BinRule`] may resolve to.
pub const MAX_RULE_BINS: usize = 1_000;

/// Rule used to derive the bin width from the data.
///
/// These are the usual bin-width estimators; names parse
/// case-insensitively (`"fd"`, `"Sturges"`, ...).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub enum BinRule {
    /// Smaller width of [`Fd`](Self::Fd) and [`Sturges`](Self::Sturges);
    /// Sturges alone when the interquartile range is zero.
    #[default]
    #[display("auto")]
    Auto,
    /// Freedman-Diaconis: `2 * IQR * n^(-1/3)`.
    #[display("fd")]
    Fd,
    /// `range / (log2(n) + 1)`.
    #[display("sturges")]
    Sturges,
    /// `range / sqrt(n)`.
    #[display("sqrt")]
    Sqrt,
    /// `range / (2 * n^(1/3))`.
    #[display("rice")]
    Rice,
    /// `(24 * sqrt(pi) / n)^(1/3) * std`.
    #[display("scott")]
    Scott,
    /// Sturges corrected for skewness.
    #[display("doane")]
    Doane,
}

/// How the number of histogram bins is chosen.
///
/// Parses from either a positive integer or a [`BinRule`] name.
///
/// # Examples
///
/// ```
/// use edakit_stats::histogram::{BinRule, Binning};
///
/// assert_eq!("12".parse::<Binning>().unwrap(), Binning::Count(12));
/// assert_eq!("fd".parse::<Binning>().unwrap(), Binning::Rule(BinRule::Fd));
/// assert!("0".parse::<Binning>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum Binning {
    /// A fixed number of bins.
    Count(usize),
    /// A bin-width estimator.
    Rule(BinRule),
}

impl Default for Binning {
    fn default() -> Self {
        Self::Rule(BinRule::Auto)
    }
}

impl fmt::Display for Binning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => fmt::Display::fmt(count, f),
            Self::Rule(rule) => fmt::Display::fmt(rule, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid binning {input:?}: expected a positive bin count or one of auto, fd, sturges, sqrt, rice, scott, doane")]
pub struct ParseBinningError {
    pub input: String,
}

impl FromStr for Binning {
    type Err = ParseBinningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ParseBinningError {
            input: s.to_owned(),
        };
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return match s.parse::<usize>() {
                Ok(count) if count > 0 => Ok(Self::Count(count)),
                _ => Err(invalid()),
            };
        }
        s.parse::<BinRule>().map(Self::Rule).map_err(|_| invalid())
    }
}

impl BinRule {
    /// Estimates the bin width for finite, sorted values.
    ///
    /// A width of `0.0` means the rule cannot be applied and a single bin
    /// is used.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bin_width(self, sorted_values: &[f64]) -> f64 {
        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return 0.0;
        };
        let n = sorted_values.len() as f64;
        let range = max - min;
        match self {
            Self::Auto => {
                let fd = Self::Fd.bin_width(sorted_values);
                let sturges = Self::Sturges.bin_width(sorted_values);
                if fd > 0.0 { fd.min(sturges) } else { sturges }
            }
            Self::Fd => {
                let iqr = percentiles::compute_percentile(sorted_values, 75.0)
                    - percentiles::compute_percentile(sorted_values, 25.0);
                2.0 * iqr * n.powf(-1.0 / 3.0)
            }
            Self::Sturges => range / (n.log2() + 1.0),
            Self::Sqrt => range / n.sqrt(),
            Self::Rice => range / (2.0 * n.cbrt()),
            Self::Scott => (24.0 * PI.sqrt() / n).cbrt() * population_std_dev(sorted_values),
            Self::Doane => {
                if sorted_values.len() <= 2 {
                    return 0.0;
                }
                let sg1 = (6.0 * (n - 2.0) / ((n + 1.0) * (n + 3.0))).sqrt();
                let sigma = population_std_dev(sorted_values);
                if sigma <= 0.0 {
                    return 0.0;
                }
                let mean = sorted_values.iter().sum::<f64>() / n;
                let g1 = sorted_values
                    .iter()
                    .map(|v| ((v - mean) / sigma).powi(3))
                    .sum::<f64>()
                    / n;
                range / (1.0 + n.log2() + (1.0 + g1.abs() / sg1).log2())
            }
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

impl Binning {
    /// Resolves the number of bins for finite, sorted values.
    ///
    /// A rule that would produce more than [`MAX_RULE_BINS`] bins (tiny
    /// interquartile range next to a far outlier, say) falls back to
    /// [`BinRule::Sturges`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use edakit_stats::histogram::{BinRule, Binning, MAX_RULE_BINS};
    /// let mut values = vec![1000.0; 50];
    /// values.extend([1000.01; 50]);
    /// values.push(1e7);
    /// assert!(Binning::Rule(BinRule::Fd).bin_count(&values) <= MAX_RULE_BINS);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bin_count(self, sorted_values: &[f64]) -> usize {
        match self {
            Self::Count(count) => count.max(1),
            Self::Rule(rule) => {
                let count = rule_bin_count(rule, sorted_values);
                if count > MAX_RULE_BINS as f64 {
                    tracing::warn!(
                        %rule,
                        requested = count,
                        "bin rule asks for too many bins, using sturges"
                    );
                    return clamp_count(rule_bin_count(BinRule::Sturges, sorted_values));
                }
                clamp_count(count)
            }
        }
    }
}

fn rule_bin_count(rule: BinRule, sorted_values: &[f64]) -> f64 {
    let width = rule.bin_width(sorted_values);
    let (lower, upper) = outer_edges(sorted_values);
    if width > 0.0 && width.is_finite() {
        ((upper - lower) / width).ceil().max(1.0)
    } else {
        1.0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn clamp_count(count: f64) -> usize {
    count.clamp(1.0, MAX_RULE_BINS as f64) as usize
}

/// Range spanned by the bins; a zero-width range is widened to `value ± 0.5`.
fn outer_edges(sorted_values: &[f64]) -> (f64, f64) {
    let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
        return (0.0, 1.0);
    };
    if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    }
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edakit_stats::histogram::{Binning, Histogram};
    /// let values = [10.0, 12.0, 14.0, 10.0, 18.0, 20.0, 10.0];
    /// let histogram = Histogram::new(&values, Binning::Count(4));
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [4, 1, 0, 2]);
    /// assert_eq!(histogram.bin_width(), 2.5);
    /// ```
    #[must_use]
    pub fn new(values: &[f64], binning: Binning) -> Self {
        let mut sorted = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, binning)
    }

    /// Creates a histogram from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order or
    /// contains non-finite values.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], binning: Binning) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        assert!(
            sorted_values.iter().all(|v| v.is_finite()),
            "values must be finite"
        );

        if sorted_values.is_empty() {
            return Self { bins: vec![] };
        }

        let num_bins = binning.bin_count(sorted_values);
        let (lower, upper) = outer_edges(sorted_values);
        let span = upper - lower;

        // Recompute each edge from the span to avoid floating-point accumulation errors
        let edge = |i: usize| {
            if i == num_bins {
                upper
            } else {
                lower + span * (i as f64) / (num_bins as f64)
            }
        };
        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                range: edge(i)..edge(i + 1),
                count: 0,
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let position = (val - lower) / span * num_bins as f64;
            let mut idx = (position.max(0.0) as usize).min(num_bins - 1);
            // Correct rounding so that each value lands in the bin whose edges contain it
            if idx > 0 && val < bins[idx].range.start {
                idx -= 1;
            } else if idx + 1 < num_bins && val >= bins[idx].range.end {
                idx += 1;
            }
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Width shared by all bins, or `NaN` for an empty histogram.
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        self.bins
            .first()
            .map_or(f64::NAN, |bin| bin.range.end - bin.range.start)
    }

    /// The `len + 1` bin edges.
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        let mut edges = self
            .bins
            .iter()
            .map(|bin| bin.range.start)
            .collect::<Vec<_>>();
        edges.extend(self.bins.last().map(|bin| bin.range.end));
        edges
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: [f64; 7] = [10.0, 12.0, 14.0, 10.0, 18.0, 20.0, 10.0];

    fn counts(histogram: &Histogram) -> Vec<u64> {
        histogram.bins.iter().map(|b| b.count).collect()
    }

    #[test]
    fn test_tied_sample_with_outlier_falls_back_to_sturges() {
        let mut values = vec![1000.0; 50];
        values.extend([1000.01; 50]);
        values.push(1e7);

        for rule in [BinRule::Auto, BinRule::Fd] {
            assert_eq!(Binning::Rule(rule).bin_count(&values), 8);
        }
        let histogram = Histogram::new(&values, Binning::default());
        assert_eq!(histogram.bins.len(), 8);
        assert_eq!(histogram.total_count(), 101);
        assert_eq!(histogram.bins[0].count, 100);
    }

    #[test]
    fn test_explicit_count_is_not_capped() {
        assert_eq!(
            Binning::Count(MAX_RULE_BINS + 1).bin_count(&REFERENCE),
            MAX_RULE_BINS + 1
        );
    }

    #[test]
    fn test_empty_values() {
        let histogram = Histogram::new(&[], Binning::default());
        assert!(histogram.bins.is_empty());
        assert!(histogram.bin_width().is_nan());
        assert!(histogram.edges().is_empty());
    }

    #[test]
    fn test_auto_picks_narrower_of_fd_and_sturges() {
        let mut sorted = REFERENCE.to_vec();
        sorted.sort_by(f64::total_cmp);
        let sturges = BinRule::Sturges.bin_width(&sorted);
        let fd = BinRule::Fd.bin_width(&sorted);
        assert!(sturges < fd);
        assert_eq!(BinRule::Auto.bin_width(&sorted), sturges);

        let histogram = Histogram::new(&REFERENCE, Binning::default());
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(counts(&histogram), [4, 1, 0, 2]);
    }

    #[test]
    fn test_auto_falls_back_to_sturges_for_zero_iqr() {
        let values = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 9.0];
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(BinRule::Fd.bin_width(&sorted), 0.0);
        assert_eq!(
            BinRule::Auto.bin_width(&sorted),
            BinRule::Sturges.bin_width(&sorted)
        );
    }

    #[test]
    fn test_rule_bin_counts() {
        let values = (1..=100).map(f64::from).collect::<Vec<_>>();
        // ptp 99: sqrt -> 99/10, sturges -> 99/(log2(100)+1), rice -> 99/(2*100^(1/3))
        assert_eq!(Binning::Rule(BinRule::Sqrt).bin_count(&values), 10);
        assert_eq!(Binning::Rule(BinRule::Sturges).bin_count(&values), 8);
        assert_eq!(Binning::Rule(BinRule::Rice).bin_count(&values), 10);
    }

    #[test]
    fn test_constant_values_span_unit_range() {
        let histogram = Histogram::new(&[3.0; 5], Binning::default());
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].range, 2.5..3.5);
        assert_eq!(histogram.bins[0].count, 5);
    }

    #[test]
    fn test_last_bin_includes_maximum() {
        let histogram = Histogram::new(&[0.0, 1.0, 2.0, 3.0], Binning::Count(3));
        assert_eq!(counts(&histogram), [1, 1, 2]);
        assert_eq!(histogram.edges(), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_preserves_all_finite_values() {
        let values = [0.1, 0.2, 0.3, 0.7, 0.9, f64::NAN, 1.3, f64::INFINITY];
        let histogram = Histogram::new(&values, Binning::Count(7));
        assert_eq!(histogram.total_count(), 6);
        for bin in &histogram.bins {
            assert!(bin.range.start < bin.range.end);
        }
    }

    #[test]
    fn test_doane_needs_three_values() {
        assert_eq!(BinRule::Doane.bin_width(&[1.0, 2.0]), 0.0);
        assert!(BinRule::Doane.bin_width(&[1.0, 2.0, 4.0]) > 0.0);
    }

    #[test]
    fn test_parse_rule_names() {
        for (input, rule) in [
            ("auto", BinRule::Auto),
            ("FD", BinRule::Fd),
            ("sturges", BinRule::Sturges),
            ("scott", BinRule::Scott),
        ] {
            assert_eq!(input.parse::<Binning>().unwrap(), Binning::Rule(rule));
        }
        assert!("bogus".parse::<Binning>().is_err());
        assert!("-3".parse::<Binning>().is_err());
    }
}
