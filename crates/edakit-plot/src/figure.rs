//! Backend-independent figure model.
//!
//! A [`Figure`] is a plain value: a title, a physical size and a stack of
//! [`Panel`]s, each holding the [`Element`]s drawn on it. Renderers only read
//! it, so the same figure can be saved to a file and shown on screen.

use edakit_stats::boxplot::BoxSummary;
use serde::{Deserialize, Serialize};

/// Fraction of the data span added on each side of automatic axis limits.
pub const AUTO_MARGIN: f64 = 0.05;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// First color of the default categorical cycle (blue).
    pub const C0: Self = Self(0x1f, 0x77, 0xb4);
    /// Second color of the default categorical cycle (orange).
    pub const C1: Self = Self(0xff, 0x7f, 0x0e);
    /// Third color of the default categorical cycle (green).
    pub const C2: Self = Self(0x2c, 0xa0, 0x2c);
    /// Fourth color of the default categorical cycle (red).
    pub const C3: Self = Self(0xd6, 0x27, 0x28);
    pub const BLACK: Self = Self(0, 0, 0);
    pub const GRAY: Self = Self(0x80, 0x80, 0x80);
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dash {
    #[default]
    Solid,
    Dashed,
}

/// Stroke used for lines and reference lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    /// Stroke width in points.
    pub width: f64,
    pub dash: Dash,
    pub alpha: f64,
}

impl LineStyle {
    #[must_use]
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            width: 1.5,
            dash: Dash::Solid,
            alpha: 1.0,
        }
    }

    #[must_use]
    pub fn dashed(color: Rgb) -> Self {
        Self {
            dash: Dash::Dashed,
            ..Self::solid(color)
        }
    }

    #[must_use]
    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

/// Closed interval of axis values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Widens the interval by `fraction` of its span on both sides.
    ///
    /// A degenerate interval is widened by `0.5` instead.
    #[must_use]
    pub fn padded(self, fraction: f64) -> Self {
        let span = self.span();
        if span > 0.0 {
            Self::new(self.min - span * fraction, self.max + span * fraction)
        } else {
            Self::new(self.min - 0.5, self.max + 0.5)
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Evenly spaced "round" tick positions (steps of 1, 2, 2.5 or 5 times
    /// a power of ten), about `target` of them.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        let span = self.span();
        if target == 0 || !span.is_finite() || span <= 0.0 {
            return vec![];
        }
        let raw_step = span / target as f64;
        let magnitude = 10.0_f64.powf(raw_step.log10().floor());
        let step = [1.0, 2.0, 2.5, 5.0, 10.0]
            .into_iter()
            .map(|m| m * magnitude)
            .find(|&step| step >= raw_step)
            .unwrap_or(10.0 * magnitude);
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// A horizontal box plot centered on `y = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxElement {
    pub summary: BoxSummary,
    pub fill: Rgb,
    pub median: LineStyle,
    pub mean: LineStyle,
    /// Height of the box in data units.
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub left: f64,
    pub right: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bars {
    pub bars: Vec<Bar>,
    pub fill: Rgb,
    pub alpha: f64,
    pub edge: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub points: Vec<(f64, f64)>,
    pub style: LineStyle,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    /// Marker radius in points.
    pub radius: f64,
}

/// A line spanning the whole panel at a fixed coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub at: f64,
    pub style: LineStyle,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Element {
    Box(BoxElement),
    Bars(Bars),
    Line(Line),
    Scatter(Scatter),
    #[from(skip)]
    VerticalLine(ReferenceLine),
    #[from(skip)]
    HorizontalLine(ReferenceLine),
}

impl Element {
    /// Horizontal extent of the element's data, if it has any.
    #[must_use]
    pub fn x_extent(&self) -> Option<Limits> {
        match self {
            Self::Box(b) => {
                let (low, high) = b.summary.extent();
                Some(Limits::new(low, high))
            }
            Self::Bars(b) => extent(b.bars.iter().flat_map(|bar| [bar.left, bar.right])),
            Self::Line(l) => extent(l.points.iter().map(|p| p.0)),
            Self::Scatter(s) => extent(s.points.iter().map(|p| p.0)),
            Self::VerticalLine(r) => Some(Limits::point(r.at)),
            Self::HorizontalLine(_) => None,
        }
    }

    /// Vertical extent of the element's data, if it has any.
    #[must_use]
    pub fn y_extent(&self) -> Option<Limits> {
        match self {
            Self::Box(b) => Some(Limits::new(-b.height / 2.0, b.height / 2.0)),
            Self::Bars(b) => extent(b.bars.iter().flat_map(|bar| [0.0, bar.height])),
            Self::Line(l) => extent(l.points.iter().map(|p| p.1)),
            Self::Scatter(s) => extent(s.points.iter().map(|p| p.1)),
            Self::VerticalLine(_) => None,
            Self::HorizontalLine(r) => Some(Limits::point(r.at)),
        }
    }

    /// Legend entry, if the element is labelled.
    #[must_use]
    pub fn legend(&self) -> Option<(&str, LineStyle)> {
        match self {
            Self::Line(Line { label, style, .. })
            | Self::VerticalLine(ReferenceLine { label, style, .. })
            | Self::HorizontalLine(ReferenceLine { label, style, .. }) => {
                label.as_deref().map(|label| (label, *style))
            }
            Self::Box(_) | Self::Bars(_) | Self::Scatter(_) => None,
        }
    }
}

fn extent(values: impl IntoIterator<Item = f64>) -> Option<Limits> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .map(Limits::point)
        .reduce(Limits::union)
}

/// One set of axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Relative height within the figure.
    pub height_ratio: f64,
    pub x_limits: Option<Limits>,
    pub y_limits: Option<Limits>,
    pub grid: bool,
    pub legend: bool,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    /// Whether tick labels are drawn on the y axis.
    pub y_ticks: bool,
    pub elements: Vec<Element>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            height_ratio: 1.0,
            x_limits: None,
            y_limits: None,
            grid: false,
            legend: false,
            x_title: None,
            y_title: None,
            y_ticks: true,
            elements: vec![],
        }
    }
}

impl Panel {
    #[must_use]
    pub fn new(height_ratio: f64) -> Self {
        Self {
            height_ratio,
            ..Self::default()
        }
    }

    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    /// Data extent along x without margins.
    #[must_use]
    pub fn x_extent(&self) -> Option<Limits> {
        self.elements
            .iter()
            .filter_map(Element::x_extent)
            .reduce(Limits::union)
    }

    /// Effective x limits: explicit limits or the padded data extent.
    #[must_use]
    pub fn x_limits(&self) -> Limits {
        self.x_limits.unwrap_or_else(|| {
            self.x_extent()
                .map_or(Limits::new(0.0, 1.0), |l| l.padded(AUTO_MARGIN))
        })
    }

    /// Effective y limits: explicit limits or the padded data extent.
    ///
    /// Bars stick to zero, so non-negative bar charts start exactly at `0`.
    #[must_use]
    pub fn y_limits(&self) -> Limits {
        if let Some(limits) = self.y_limits {
            return limits;
        }
        let Some(extent) = self
            .elements
            .iter()
            .filter_map(Element::y_extent)
            .reduce(Limits::union)
        else {
            return Limits::new(0.0, 1.0);
        };
        let mut limits = extent.padded(AUTO_MARGIN);
        let has_bars = self.elements.iter().any(|e| matches!(e, Element::Bars(_)));
        if has_bars && extent.min >= 0.0 {
            limits.min = 0.0;
        }
        limits
    }

    /// Labelled elements, in drawing order.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, LineStyle)> + '_ {
        self.elements.iter().filter_map(Element::legend)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub text: String,
    pub color: Rgb,
    /// Font size in points.
    pub size: f64,
    pub bold: bool,
}

impl Title {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Rgb::BLACK,
            size: 12.0,
            bold: false,
        }
    }
}

/// Physical size of a figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}

impl FigureSize {
    /// Size in whole pixels (at least 1×1).
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn pixels(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * self.dpi).round().max(1.0) as u32;
        (px(self.width_in), px(self.height_in))
    }

    /// Converts a length in points to pixels at this size's DPI.
    #[must_use]
    pub fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }
}

/// A complete chart: title, size and vertically stacked panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<Title>,
    pub size: FigureSize,
    pub panels: Vec<Panel>,
    /// Panels use the union of their x limits.
    pub share_x: bool,
    /// Vertical gap between panels, as a fraction of the mean panel height.
    pub panel_gap: f64,
}

impl Figure {
    #[must_use]
    pub fn new(size: FigureSize) -> Self {
        Self {
            title: None,
            size,
            panels: vec![],
            share_x: false,
            panel_gap: 0.0,
        }
    }

    /// Effective x limits of the panel at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn x_limits(&self, index: usize) -> Limits {
        if !self.share_x {
            return self.panels[index].x_limits();
        }
        if let Some(limits) = self.panels.iter().find_map(|p| p.x_limits) {
            return limits;
        }
        self.panels
            .iter()
            .filter_map(Panel::x_extent)
            .reduce(Limits::union)
            .map_or(Limits::new(0.0, 1.0), |l| l.padded(AUTO_MARGIN))
    }

    /// Splits `total` pixels among the panels by height ratio, after
    /// reserving the inter-panel gaps.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn panel_heights(&self, total: u32) -> (Vec<u32>, u32) {
        let count = self.panels.len();
        if count == 0 {
            return (vec![], 0);
        }
        let ratio_sum = self.panels.iter().map(|p| p.height_ratio).sum::<f64>();
        let gaps = (count - 1) as f64;
        // the gap is relative to the mean panel height
        let mean_height = f64::from(total) / (count as f64 + gaps * self.panel_gap);
        let gap = (mean_height * self.panel_gap).round() as u32;
        let available = total.saturating_sub(gap * (count as u32 - 1));
        let mut heights = self.panels[..count - 1]
            .iter()
            .map(|p| (f64::from(available) * p.height_ratio / ratio_sum).round() as u32)
            .collect::<Vec<_>>();
        // last panel takes the rounding remainder
        heights.push(available.saturating_sub(heights.iter().sum()));
        (heights, gap)
    }
}
