//! Box plot stacked over a histogram of one sample.

use edakit_stats::{
    comprehensive::ComprehensiveStats,
    density::{DEFAULT_CURVE_POINTS, GaussianKde},
    histogram::Binning,
};

use crate::{
    figure::{
        Bar, Bars, BoxElement, Element, Figure, Limits, Line, LineStyle, Panel, ReferenceLine,
        Rgb, Title,
    },
    style::FigureStyle,
};

pub const DEFAULT_TITLE: &str = "Título do Gráfico";
pub const DEFAULT_FILE_NAME: &str = "distribuicao.png";

const DEFAULT_WIDTH: f64 = 6.4;
const DEFAULT_HEIGHT: f64 = 4.8;
const BOX_PANEL_RATIO: f64 = 0.15;
const HISTOGRAM_PANEL_RATIO: f64 = 0.85;
const PANEL_GAP: f64 = 0.02;
const BOX_HEIGHT: f64 = 0.8;
const BAR_ALPHA: f64 = 0.75;

pub const MEAN_LABEL: &str = "Média";
pub const MEDIAN_LABEL: &str = "Mediana";
pub const MODE_LABEL: &str = "Moda";

/// Builder for the distribution figure.
///
/// # Examples
///
/// ```
/// use edakit_plot::distribution::DistributionPlot;
///
/// let figure = DistributionPlot::new()
///     .with_title("Distribuição Salarial")
///     .render(&[10.0, 12.0, 14.0, 10.0, 18.0, 20.0, 10.0])
///     .unwrap();
/// assert_eq!(figure.panels.len(), 2);
/// assert!(figure.share_x);
/// ```
#[derive(Debug, Clone)]
pub struct DistributionPlot {
    binning: Binning,
    title: String,
    style: FigureStyle,
}

impl Default for DistributionPlot {
    fn default() -> Self {
        Self {
            binning: Binning::default(),
            title: DEFAULT_TITLE.to_owned(),
            style: FigureStyle::default(),
        }
    }
}

impl DistributionPlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_binning(mut self, binning: Binning) -> Self {
        self.binning = binning;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: FigureStyle) -> Self {
        self.style = style;
        self
    }

    /// Builds the figure; `None` if `values` has no finite value.
    ///
    /// The upper panel holds the box plot (median solid, mean dashed), the
    /// lower one the histogram with a density curve and dashed reference
    /// lines for the mean, median and mode.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn render(&self, values: &[f64]) -> Option<Figure> {
        let summary = ComprehensiveStats::new(values, self.binning)?;

        let mut box_panel = Panel::new(BOX_PANEL_RATIO);
        box_panel.grid = true;
        box_panel.y_ticks = false;
        box_panel.y_limits = Some(Limits::new(-0.5, 0.5));
        box_panel.push(BoxElement {
            summary: summary.box_summary.clone(),
            fill: Rgb::C0,
            median: LineStyle::solid(Rgb::C2),
            mean: LineStyle::dashed(Rgb::C1),
            height: BOX_HEIGHT,
        });

        let mut histogram_panel = Panel::new(HISTOGRAM_PANEL_RATIO);
        histogram_panel.grid = true;
        histogram_panel.legend = true;
        histogram_panel.push(Bars {
            bars: summary
                .histogram
                .bins
                .iter()
                .map(|bin| Bar {
                    left: bin.range.start,
                    right: bin.range.end,
                    height: bin.count as f64,
                })
                .collect(),
            fill: Rgb::C0,
            alpha: BAR_ALPHA,
            edge: Rgb::WHITE,
        });

        if let Some(kde) = GaussianKde::new(values) {
            histogram_panel.push(Line {
                points: kde.count_curve(DEFAULT_CURVE_POINTS, summary.histogram.bin_width()),
                style: LineStyle::solid(Rgb::C0),
                label: None,
            });
        } else {
            tracing::debug!("skipping density curve: sample has no spread");
        }

        let stats = &summary.stats;
        for (at, color, label) in [
            (stats.mean, Rgb::C1, MEAN_LABEL),
            (stats.median, Rgb::C2, MEDIAN_LABEL),
            (stats.mode.value, Rgb::C3, MODE_LABEL),
        ] {
            histogram_panel
                .elements
                .push(Element::VerticalLine(ReferenceLine {
                    at,
                    style: LineStyle::dashed(color),
                    label: Some(label.to_owned()),
                }));
        }

        let mut figure = Figure::new(self.style.size(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        figure.title = Some(Title {
            text: self.title.clone(),
            color: Rgb::GRAY,
            size: 14.0,
            bold: true,
        });
        figure.share_x = true;
        figure.panel_gap = PANEL_GAP;
        figure.panels = vec![box_panel, histogram_panel];
        Some(figure)
    }
}
