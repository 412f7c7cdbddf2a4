use serde::{Deserialize, Serialize};

/// An ordered sequence of real-valued observations.
///
/// Ordering carries no meaning for the statistics in this crate, but it is
/// preserved so that index-based views (such as residual plots) stay faithful
/// to the input. Duplicates are allowed.
///
/// # Examples
///
/// ```
/// use edakit_stats::sample::Sample;
///
/// let sample = Sample::from(vec![3.0, 1.0, 2.0]);
/// assert_eq!(sample.len(), 3);
/// assert_eq!(sample.sorted(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::AsRef,
    derive_more::Deref,
)]
#[serde(transparent)]
#[as_ref(forward)]
#[deref(forward)]
pub struct Sample(Vec<f64>);

/// Error returned when a value in loosely-typed input is not numeric.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("element {index} is not numeric: {value:?}")]
pub struct ParseSampleError {
    /// Position of the offending element in the input.
    pub index: usize,
    /// The offending element, as text.
    pub value: String,
}

impl Sample {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Parses a sample from textual values.
    ///
    /// Surrounding whitespace is ignored. IEEE special values (`NaN`, `inf`)
    /// are numeric and accepted; anything else that does not parse as a
    /// number is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use edakit_stats::sample::Sample;
    ///
    /// let sample = Sample::parse(["1.5", " 2", "3e1"]).unwrap();
    /// assert_eq!(sample.as_slice(), &[1.5, 2.0, 30.0]);
    ///
    /// let err = Sample::parse(["1", "two"]).unwrap_err();
    /// assert_eq!(err.index, 1);
    /// assert_eq!(err.value, "two");
    /// ```
    pub fn parse<I, S>(values: I) -> Result<Self, ParseSampleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let value = value.as_ref();
                value.trim().parse::<f64>().map_err(|_| ParseSampleError {
                    index,
                    value: value.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns a sorted copy of the observations, leaving the sample untouched.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.0.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[f64]> for Sample {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty_text() {
        let err = Sample::parse(["1", "  "]).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.to_string(), "element 1 is not numeric: \"  \"");
    }

    #[test]
    fn test_parse_accepts_ieee_specials() {
        let sample = Sample::parse(["NaN", "inf", "-inf"]).unwrap();
        assert!(sample[0].is_nan());
        assert_eq!(sample[1], f64::INFINITY);
        assert_eq!(sample[2], f64::NEG_INFINITY);
    }

    #[test]
    fn test_sorted_does_not_mutate() {
        let sample = Sample::from(vec![3.0, 1.0, 2.0]);
        let _ = sample.sorted();
        assert_eq!(sample.as_slice(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_serde_is_transparent() {
        let sample: Sample = serde_json::from_str("[1.0, 2.5]").unwrap();
        assert_eq!(sample.as_slice(), &[1.0, 2.5]);
        assert_eq!(serde_json::to_string(&sample).unwrap(), "[1.0,2.5]");
    }
}
