//! Statistical helpers for exploratory data analysis.
//!
//! This crate provides:
//!
//! - **Descriptive statistics**: mean, median, mode, variance, moments and quartiles
//! - **Percentiles**: linear-interpolation percentiles over sorted data
//! - **Variance equality test**: two-sample F-test with a formatted report
//! - **Histograms**: equal-width binning with the usual bin-width rules
//! - **Density**: Gaussian kernel density estimate
//! - **Box summaries**: quartiles, whiskers and outliers for box plots
//!
//! # Modules
//!
//! - [`sample`]: Numeric samples and parsing from text
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation
//! - [`special`]: Log-gamma and incomplete beta functions
//! - [`distribution`]: Fisher-Snedecor distribution
//! - [`variance_test`]: F-test for equality of variances
//! - [`histogram`]: Histogram construction and bin rules
//! - [`density`]: Kernel density estimation
//! - [`boxplot`]: Box plot summaries
//! - [`comprehensive`]: Combined summary used to draw a distribution
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use edakit_stats::descriptive::{DescriptiveStats, Statistic};
//!
//! let stats = DescriptiveStats::new(&[1.0, 2.0, 3.0, 4.0, 5.0]);
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.get(Statistic::SecondQuartile), stats.median);
//! ```
//!
//! ## Comparing variances
//!
//! ```
//! use edakit_stats::variance_test::VarianceTest;
//!
//! let result = VarianceTest::new()
//!     .compare(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0])
//!     .unwrap();
//! assert_eq!(result.f_statistic, 4.0);
//! assert!(result.p_value > 0.05);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use edakit_stats::histogram::{Binning, Histogram};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(&values, "sturges".parse::<Binning>().unwrap());
//! assert_eq!(histogram.total_count(), 10);
//! ```

pub mod boxplot;
pub mod comprehensive;
pub mod density;
pub mod descriptive;
pub mod distribution;
pub mod histogram;
pub mod percentiles;
pub mod sample;
pub mod special;
pub mod variance_test;
