//! Standardized-residual scatter for regression diagnostics.

use edakit_stats::sample::Sample;

use crate::{
    figure::{Element, Figure, Limits, LineStyle, Panel, ReferenceLine, Rgb, Scatter, Title},
    style::FigureStyle,
};

pub const TITLE: &str = "Gráfico de Resíduos Padronizados";
pub const X_TITLE: &str = "Observações";
pub const Y_TITLE: &str = "Resíduos Padronizados";
pub const DEFAULT_FILE_NAME: &str = "residuos.png";

const DEFAULT_WIDTH: f64 = 8.0;
const DEFAULT_HEIGHT: f64 = 4.0;
const REFERENCE_LEVELS: [f64; 3] = [0.0, 2.0, -2.0];
const MIN_HALF_RANGE: f64 = 3.0;
const LIMIT_PADDING: f64 = 1.1;

/// A fitted model result exposing standardized (Pearson) residuals.
pub trait StandardizedResiduals {
    fn standardized_residuals(&self) -> &[f64];
}

impl StandardizedResiduals for [f64] {
    fn standardized_residuals(&self) -> &[f64] {
        self
    }
}

impl StandardizedResiduals for Vec<f64> {
    fn standardized_residuals(&self) -> &[f64] {
        self
    }
}

impl StandardizedResiduals for Sample {
    fn standardized_residuals(&self) -> &[f64] {
        self.as_slice()
    }
}

/// Vertical limits: `min(-3, min r) * 1.1 ..= max(3, max r) * 1.1`.
///
/// # Examples
///
/// ```
/// use edakit_plot::residual::y_limits;
///
/// let limits = y_limits(&[-1.0, 0.5, 4.0]);
/// assert!((limits.min + 3.3).abs() < 1e-12);
/// assert!((limits.max - 4.4).abs() < 1e-12);
/// ```
#[must_use]
pub fn y_limits(residuals: &[f64]) -> Limits {
    let (min, max) = residuals
        .iter()
        .filter(|r| r.is_finite())
        .fold((-MIN_HALF_RANGE, MIN_HALF_RANGE), |(lo, hi), &r| {
            (lo.min(r), hi.max(r))
        });
    Limits::new(min * LIMIT_PADDING, max * LIMIT_PADDING)
}

/// Builder for the residual scatter figure.
#[derive(Debug, Clone, Default)]
pub struct ResidualPlot {
    style: FigureStyle,
}

impl ResidualPlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_style(mut self, style: FigureStyle) -> Self {
        self.style = style;
        self
    }

    /// Plots each residual against its observation index, with dashed
    /// reference lines at 0 and ±2.
    ///
    /// # Examples
    ///
    /// ```
    /// use edakit_plot::residual::ResidualPlot;
    ///
    /// let figure = ResidualPlot::new().render(&vec![0.3, -1.2, 2.5]);
    /// assert_eq!(figure.size.pixels(), (2400, 1200));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn render<R>(&self, fitted: &R) -> Figure
    where
        R: StandardizedResiduals + ?Sized,
    {
        let residuals = fitted.standardized_residuals();

        let mut panel = Panel::default();
        panel.y_limits = Some(y_limits(residuals));
        panel.x_title = Some(X_TITLE.to_owned());
        panel.y_title = Some(Y_TITLE.to_owned());
        panel.push(Scatter {
            points: residuals
                .iter()
                .enumerate()
                .map(|(i, &r)| (i as f64, r))
                .collect(),
            color: Rgb::C0,
            radius: 3.0,
        });
        for level in REFERENCE_LEVELS {
            panel.elements.push(Element::HorizontalLine(ReferenceLine {
                at: level,
                style: LineStyle::dashed(Rgb::BLACK),
                label: None,
            }));
        }

        let mut figure = Figure::new(self.style.size(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        figure.title = Some(Title::new(TITLE));
        figure.panels = vec![panel];
        figure
    }
}
