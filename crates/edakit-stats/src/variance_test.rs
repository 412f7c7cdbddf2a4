//! Two-sample F-test for equality of variances.
//!
//! The larger sample variance is always the numerator, so `F >= 1` and the
//! test is independent of argument order. The two-tailed p-value is
//! `2 * min(p, 1 - p)` where `p = 1 - CDF(F; df1, df2)`.
//!
//! # Examples
//!
//! ```
//! use edakit_stats::variance_test::VarianceTest;
//!
//! let result = VarianceTest::default()
//!     .compare(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0])
//!     .unwrap();
//!
//! assert_eq!(result.f_statistic, 4.0);
//! assert!((result.p_value - 0.4).abs() < 1e-12);
//! assert!(!result.rejects_null());
//! println!("{result}");
//! ```

use std::{cmp::Ordering, fmt};

use crate::distribution::FisherSnedecor;

/// Significance level used when none is given.
pub const DEFAULT_ALPHA: f64 = 0.05;

const BANNER_WIDTH: usize = 50;

/// Configuration of a variance-equality test: group labels and significance level.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceTest {
    label_a: String,
    label_b: String,
    alpha: f64,
}

impl Default for VarianceTest {
    fn default() -> Self {
        Self {
            label_a: "Grupo 1".to_owned(),
            label_b: "Grupo 2".to_owned(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum VarianceTestError {
    #[display("sample {label:?} needs at least 2 observations, got {len}")]
    TooFewObservations { label: String, len: usize },
    #[display("alpha must lie strictly between 0 and 1, got {alpha}")]
    InvalidAlpha { alpha: f64 },
    #[display("both samples have zero variance, the F statistic is undefined")]
    ZeroVariance,
}

/// Outcome of a variance-equality test.
///
/// [`Display`](fmt::Display) renders the fixed-layout text report.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceTestResult {
    pub label_a: String,
    pub label_b: String,
    /// Unbiased variance of the first sample.
    pub variance_a: f64,
    /// Unbiased variance of the second sample.
    pub variance_b: f64,
    /// Larger variance over smaller variance.
    pub f_statistic: f64,
    /// Degrees of freedom of the sample with the larger variance.
    pub df_numerator: usize,
    /// Degrees of freedom of the other sample.
    pub df_denominator: usize,
    /// Two-tailed p-value.
    pub p_value: f64,
    pub alpha: f64,
}

impl VarianceTest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the labels used for the two groups in the report.
    #[must_use]
    pub fn with_labels(mut self, label_a: impl Into<String>, label_b: impl Into<String>) -> Self {
        self.label_a = label_a.into();
        self.label_b = label_b.into();
        self
    }

    /// Sets the significance level.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Runs the test on two independent samples.
    ///
    /// When exactly one sample has zero variance the statistic is `+inf` and
    /// the p-value `0.0`. Both samples having zero variance is an error.
    pub fn compare(&self, a: &[f64], b: &[f64]) -> Result<VarianceTestResult, VarianceTestError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(VarianceTestError::InvalidAlpha { alpha: self.alpha });
        }
        for (label, sample) in [(&self.label_a, a), (&self.label_b, b)] {
            if sample.len() < 2 {
                return Err(VarianceTestError::TooFewObservations {
                    label: label.clone(),
                    len: sample.len(),
                });
            }
        }

        let variance_a = unbiased_variance(a);
        let variance_b = unbiased_variance(b);
        if variance_a == 0.0 && variance_b == 0.0 {
            return Err(VarianceTestError::ZeroVariance);
        }

        let (df_a, df_b) = (a.len() - 1, b.len() - 1);
        // ties go to the sample with more degrees of freedom
        let a_is_numerator = match variance_a.total_cmp(&variance_b) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => df_a >= df_b,
        };
        let (f_statistic, df_numerator, df_denominator) = if a_is_numerator {
            (variance_a / variance_b, df_a, df_b)
        } else {
            (variance_b / variance_a, df_b, df_a)
        };

        let p_value = two_tailed_p_value(f_statistic, df_numerator, df_denominator);

        Ok(VarianceTestResult {
            label_a: self.label_a.clone(),
            label_b: self.label_b.clone(),
            variance_a,
            variance_b,
            f_statistic,
            df_numerator,
            df_denominator,
            p_value,
            alpha: self.alpha,
        })
    }
}

/// Compares the variances of two samples with default labels.
///
/// Returns the two-tailed p-value and the text report.
pub fn compare(a: &[f64], b: &[f64], alpha: f64) -> Result<(f64, String), VarianceTestError> {
    let result = VarianceTest::default().with_alpha(alpha).compare(a, b)?;
    Ok((result.p_value, result.to_string()))
}

#[expect(clippy::cast_precision_loss)]
fn two_tailed_p_value(f_statistic: f64, df_numerator: usize, df_denominator: usize) -> f64 {
    let dist = FisherSnedecor::new(df_numerator as f64, df_denominator as f64);
    let one_tailed = dist.sf(f_statistic);
    2.0 * f64::min(one_tailed, 1.0 - one_tailed)
}

#[expect(clippy::cast_precision_loss)]
fn unbiased_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
}

impl VarianceTestResult {
    /// Returns `true` if equal variances are rejected at the configured level.
    #[must_use]
    pub fn rejects_null(&self) -> bool {
        self.p_value < self.alpha
    }

    #[must_use]
    pub fn decision(&self) -> &'static str {
        if self.rejects_null() {
            "Decisão: Rejeitamos H0 → As variâncias são significativamente diferentes."
        } else {
            "Decisão: Não rejeitamos H0 → As variâncias são estatisticamente iguais."
        }
    }

    /// Renders the text report.
    #[must_use]
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VarianceTestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strong = "=".repeat(BANNER_WIDTH);
        let light = "-".repeat(BANNER_WIDTH);
        let Self {
            label_a: a,
            label_b: b,
            ..
        } = self;

        writeln!(f, "{strong}")?;
        writeln!(f, " TESTE F PARA IGUALDADE DE VARIÂNCIAS ({a} vs. {b}) ")?;
        writeln!(f, "{strong}")?;
        writeln!(f)?;
        writeln!(f, "    H0: As variâncias de {a} e {b} são iguais.")?;
        writeln!(f, "    H1: As variâncias de {a} e {b} são diferentes.")?;
        writeln!(f, "    ")?;
        writeln!(f, "{strong}")?;
        writeln!(f, " RESULTADOS DO TESTE F ")?;
        writeln!(f, "{strong}")?;
        writeln!(f, "Variância de {a}     : {:.5}", self.variance_a)?;
        writeln!(f, "Variância de {b}     : {:.5}", self.variance_b)?;
        writeln!(f, "Estatística F            : {:.5}", self.f_statistic)?;
        writeln!(
            f,
            "Graus de liberdade       : {}, {}",
            self.df_numerator, self.df_denominator
        )?;
        writeln!(f, "{light}")?;
        writeln!(f, "p-valor (bicaudal)       : {:.2}%", self.p_value * 100.0)?;
        writeln!(f, "{light}")?;
        writeln!(f, "{}", self.decision())?;
        writeln!(f, "{strong}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_larger_variance_is_numerator() {
        let result = VarianceTest::default()
            .compare(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0])
            .unwrap();
        assert!((result.variance_a - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.variance_b, 4.0);
        assert!((result.f_statistic - 2.4).abs() < 1e-12);
        assert_eq!((result.df_numerator, result.df_denominator), (2, 3));
    }

    #[test]
    fn test_clearly_different_variances_are_rejected() {
        let wide = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let narrow = [5.0, 5.1, 4.9, 5.0, 5.2, 4.8, 5.0, 5.1, 4.9, 5.0];
        let result = VarianceTest::default().compare(&wide, &narrow).unwrap();
        assert!(result.f_statistic > 100.0);
        assert!(result.p_value < 1e-6);
        assert!(result.rejects_null());
    }

    #[test]
    fn test_identical_samples_have_unit_p_value() {
        let sample = [3.0, 1.0, 4.0, 1.0, 5.0];
        let result = VarianceTest::default().compare(&sample, &sample).unwrap();
        assert_eq!(result.f_statistic, 1.0);
        assert!((result.p_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equal_variances_with_different_sizes_are_order_independent() {
        let a = [1.0, 3.0];
        let b = [0.0, 2.0, 2.0, 2.0, 4.0];
        assert_eq!(unbiased_variance(&a), 2.0);
        assert_eq!(unbiased_variance(&b), 2.0);

        let ab = VarianceTest::default().compare(&a, &b).unwrap();
        let ba = VarianceTest::default().compare(&b, &a).unwrap();
        assert_eq!(ab.f_statistic, 1.0);
        assert_eq!(ab.p_value.to_bits(), ba.p_value.to_bits());
        assert_eq!((ab.df_numerator, ab.df_denominator), (4, 1));
        assert_eq!((ba.df_numerator, ba.df_denominator), (4, 1));
    }

    #[test]
    fn test_one_zero_variance_gives_infinite_statistic() {
        let result = VarianceTest::default()
            .compare(&[1.0, 1.0, 1.0, 1.0], &[1.0, 2.0, 3.0])
            .unwrap();
        assert_eq!(result.variance_a, 0.0);
        assert_eq!(result.f_statistic, f64::INFINITY);
        assert_eq!((result.df_numerator, result.df_denominator), (2, 3));
        assert_eq!(result.p_value, 0.0);
        assert!(result.rejects_null());
    }

    #[test]
    fn test_both_zero_variance_is_an_error() {
        let err = VarianceTest::default()
            .compare(&[1.0, 1.0], &[2.0, 2.0, 2.0])
            .unwrap_err();
        assert_eq!(err, VarianceTestError::ZeroVariance);
    }

    #[test]
    fn test_too_few_observations() {
        let err = VarianceTest::default()
            .with_labels("A", "B")
            .compare(&[1.0, 2.0], &[1.0])
            .unwrap_err();
        assert_eq!(
            err,
            VarianceTestError::TooFewObservations {
                label: "B".to_owned(),
                len: 1
            }
        );
    }

    #[test]
    fn test_invalid_alpha() {
        for alpha in [0.0, 1.0, -0.1, f64::NAN] {
            let err = VarianceTest::default()
                .with_alpha(alpha)
                .compare(&[1.0, 2.0], &[1.0, 3.0])
                .unwrap_err();
            assert!(matches!(err, VarianceTestError::InvalidAlpha { .. }));
        }
    }

    #[test]
    fn test_report_layout() {
        let result = VarianceTest::default()
            .with_labels("Loja A", "Loja B")
            .compare(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0])
            .unwrap();
        let expected = [
            "==================================================",
            " TESTE F PARA IGUALDADE DE VARIÂNCIAS (Loja A vs. Loja B) ",
            "==================================================",
            "",
            "    H0: As variâncias de Loja A e Loja B são iguais.",
            "    H1: As variâncias de Loja A e Loja B são diferentes.",
            "    ",
            "==================================================",
            " RESULTADOS DO TESTE F ",
            "==================================================",
            "Variância de Loja A     : 1.00000",
            "Variância de Loja B     : 4.00000",
            "Estatística F            : 4.00000",
            "Graus de liberdade       : 2, 2",
            "--------------------------------------------------",
            "p-valor (bicaudal)       : 40.00%",
            "--------------------------------------------------",
            "Decisão: Não rejeitamos H0 → As variâncias são estatisticamente iguais.",
            "==================================================",
            "",
        ]
        .join("\n");
        assert_eq!(result.report(), expected);
    }

    #[test]
    fn test_compare_function_returns_report() {
        let (p_value, report) = compare(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], 0.5).unwrap();
        assert!((p_value - 0.4).abs() < 1e-12);
        assert!(report.contains("(Grupo 1 vs. Grupo 2)"));
        assert!(report.contains("Decisão: Rejeitamos H0"));
    }

    proptest! {
        #[test]
        fn p_value_is_symmetric_under_swap(
            a in prop::collection::vec(-100.0..100.0f64, 2..20),
            b in prop::collection::vec(-100.0..100.0f64, 2..20),
        ) {
            let test = VarianceTest::default();
            match (test.compare(&a, &b), test.compare(&b, &a)) {
                (Ok(ab), Ok(ba)) => {
                    prop_assert_eq!(ab.p_value.to_bits(), ba.p_value.to_bits());
                    prop_assert_eq!(ab.f_statistic.to_bits(), ba.f_statistic.to_bits());
                }
                (Err(ab), Err(ba)) => prop_assert_eq!(ab, ba),
                (ab, ba) => prop_assert!(false, "asymmetric outcome: {ab:?} vs {ba:?}"),
            }
        }

        #[test]
        fn p_value_is_a_probability(
            a in prop::collection::vec(-100.0..100.0f64, 2..20),
            b in prop::collection::vec(-100.0..100.0f64, 2..20),
        ) {
            if let Ok(result) = VarianceTest::default().compare(&a, &b) {
                prop_assert!(result.f_statistic >= 1.0);
                prop_assert!((0.0..=1.0).contains(&result.p_value));
            }
        }
    }
}
