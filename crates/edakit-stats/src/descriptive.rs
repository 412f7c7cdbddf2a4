use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::percentiles::compute_percentile;

/// Descriptive statistics summarizing a sample.
///
/// Dispersion uses the unbiased (`n - 1`) convention. Skewness and kurtosis
/// are population standardized moments; kurtosis is the *moment* (Pearson)
/// kurtosis, so a normal distribution yields about `3.0`, not `0.0`.
///
/// Undefined statistics are `NaN` rather than errors: a single observation
/// has no variance, a constant sample has no skewness or kurtosis, and an
/// empty sample has nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The median (50th percentile, linear interpolation).
    pub median: f64,
    /// The most frequent value.
    pub mode: Mode,
    /// The unbiased sample variance.
    pub variance: f64,
    /// The square root of [`variance`](Self::variance).
    pub std_dev: f64,
    /// Third standardized moment, without bias correction.
    pub skewness: f64,
    /// Fourth standardized moment, without the `-3` shift.
    pub kurtosis: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile; always bit-identical to [`median`](Self::median).
    pub q2: f64,
    /// 75th percentile.
    pub q3: f64,
}

/// The most frequent value of a sample and how often it occurs.
///
/// When several values share the highest count the smallest one wins. This
/// includes samples without any repeated value, where every value occurs
/// once and the minimum is reported with `count == 1`; check
/// [`is_repeated`](Self::is_repeated) to tell that case apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mode {
    pub value: f64,
    pub count: usize,
}

impl Mode {
    const NONE: Self = Self {
        value: f64::NAN,
        count: 0,
    };

    /// Returns `true` if the mode value occurs more than once.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.count > 1
    }

    /// Finds the mode of pre-sorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edakit_stats::descriptive::Mode;
    /// let mode = Mode::from_sorted(&[1.0, 2.0, 2.0, 3.0, 3.0]);
    /// assert_eq!(mode.value, 2.0);
    /// assert_eq!(mode.count, 2);
    ///
    /// assert!(Mode::from_sorted(&[]).value.is_nan());
    /// ```
    ///
    /// Runs are grouped by numeric equality, so `-0.0` and `0.0` count as
    /// the same value.
    #[expect(clippy::float_cmp)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        sorted_values
            .chunk_by(|a, b| a == b)
            .fold(Self::NONE, |best, run| {
                // strictly greater keeps the earliest (smallest) value on ties
                if run.len() > best.count {
                    Self {
                        value: run[0],
                        count: run.len(),
                    }
                } else {
                    best
                }
            })
    }
}

/// Named statistics of a [`DescriptiveStats`] report, in report order.
///
/// The labels are the keys of the JSON report and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Statistic {
    #[display("Média")]
    Mean,
    #[display("Mediana")]
    Median,
    #[display("Moda")]
    Mode,
    #[display("Variância")]
    Variance,
    #[display("Desvio Padrão")]
    StdDev,
    #[display("Assimetria")]
    Skewness,
    #[display("Curtose")]
    Kurtosis,
    #[display("1º Quartil")]
    FirstQuartile,
    #[display("2º Quartil (Mediana)")]
    SecondQuartile,
    #[display("3º Quartil")]
    ThirdQuartile,
}

impl Statistic {
    pub const ALL: [Self; 10] = [
        Self::Mean,
        Self::Median,
        Self::Mode,
        Self::Variance,
        Self::StdDev,
        Self::Skewness,
        Self::Kurtosis,
        Self::FirstQuartile,
        Self::SecondQuartile,
        Self::ThirdQuartile,
    ];
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// The values are copied and sorted internally.
    ///
    /// # Examples
    ///
    /// ```
    /// # use edakit_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new(&[10.0, 12.0, 14.0, 10.0, 18.0, 20.0, 10.0]);
    /// assert_eq!(stats.median, 12.0);
    /// assert_eq!(stats.mode.value, 10.0);
    /// assert!((stats.mean - 13.428_571).abs() < 1e-6);
    /// assert!((stats.kurtosis - 1.840_614).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self::undefined();
        };
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;

        let central_moment = |power: i32| {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(power))
                .sum::<f64>()
        };
        let sum_sq = central_moment(2);
        let variance = sum_sq / (n - 1.0);
        let std_dev = variance.sqrt();

        let m2 = sum_sq / n;
        let m3 = central_moment(3) / n;
        let m4 = central_moment(4) / n;
        // relative tolerance for "numerically constant" samples
        let degenerate = m2 <= (1e-15 * mean).powi(2);
        let (skewness, kurtosis) = if degenerate {
            (f64::NAN, f64::NAN)
        } else {
            (m3 / m2.powf(1.5), m4 / (m2 * m2))
        };

        let median = compute_percentile(sorted_values, 50.0);

        Self {
            count,
            min,
            max,
            mean,
            median,
            mode: Mode::from_sorted(sorted_values),
            variance,
            std_dev,
            skewness,
            kurtosis,
            q1: compute_percentile(sorted_values, 25.0),
            q2: median,
            q3: compute_percentile(sorted_values, 75.0),
        }
    }

    fn undefined() -> Self {
        Self {
            count: 0,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            median: f64::NAN,
            mode: Mode::NONE,
            variance: f64::NAN,
            std_dev: f64::NAN,
            skewness: f64::NAN,
            kurtosis: f64::NAN,
            q1: f64::NAN,
            q2: f64::NAN,
            q3: f64::NAN,
        }
    }

    /// Returns the value of a named statistic.
    #[must_use]
    pub fn get(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Mean => self.mean,
            Statistic::Median => self.median,
            Statistic::Mode => self.mode.value,
            Statistic::Variance => self.variance,
            Statistic::StdDev => self.std_dev,
            Statistic::Skewness => self.skewness,
            Statistic::Kurtosis => self.kurtosis,
            Statistic::FirstQuartile => self.q1,
            Statistic::SecondQuartile => self.q2,
            Statistic::ThirdQuartile => self.q3,
        }
    }

    /// Iterates over the named statistics in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Statistic, f64)> + '_ {
        Statistic::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

/// Serializes as a map from statistic label to value, in report order.
impl Serialize for DescriptiveStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Statistic::ALL.len()))?;
        for (statistic, value) in self.iter() {
            map.serialize_entry(&statistic.to_string(), &value)?;
        }
        map.end()
    }
}
