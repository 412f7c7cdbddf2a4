//! Charts for exploratory data analysis.
//!
//! Plots are built as explicit [`figure::Figure`] values and drawn by a
//! [`render::Renderer`]; nothing depends on global plotting state.
//!
//! - [`distribution`]: box plot over histogram with density curve and
//!   mean/median/mode markers
//! - [`residual`]: standardized residuals against observation index
//! - [`render`]: PNG and SVG output through `plotters`
//! - [`persist`]: best-effort saving into an output directory
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use edakit_plot::{distribution::DistributionPlot, persist::DEFAULT_DIR, render::Renderer};
//!
//! let figure = DistributionPlot::new()
//!     .with_title("Distribuição Salarial")
//!     .render(&[2500.0, 3100.0, 2800.0, 4000.0, 3100.0])
//!     .unwrap();
//! let outcome = Renderer::new().persist(&figure, Path::new(DEFAULT_DIR), "salario.png");
//! println!("{}", outcome.path().display());
//! ```

pub mod distribution;
pub mod figure;
pub mod persist;
pub mod render;
pub mod residual;
pub mod style;
