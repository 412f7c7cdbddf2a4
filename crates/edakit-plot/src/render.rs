//! Rasterizes or vectorizes a [`Figure`] with `plotters`.
//!
//! Text uses DejaVu Sans, bundled with the crate, unless another face is
//! loaded with [`FontFace::load`]. Font registration is process-wide, so the
//! most recently registered face is the one used.

use std::{
    fs,
    path::{Path, PathBuf},
};

use plotters::{
    coord::{Shift, cartesian::Cartesian2d, types::RangedCoordf64},
    drawing::DrawingAreaErrorKind,
    prelude::*,
};

use crate::figure::{Dash, Element, Figure, Limits, LineStyle, Panel, Rgb};

const FONT_FAMILY: &str = "sans-serif";
const BUNDLED_REGULAR: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");
const TICK_TARGET: usize = 6;
const TICK_LABEL_SIZE: f64 = 10.0;
const AXIS_TITLE_SIZE: f64 = 10.0;
const LEGEND_SIZE: f64 = 10.0;
const PANEL_MARGIN: f64 = 6.0;
const GRID_DASHES: usize = 60;
const REFERENCE_DASHES: usize = 40;
const BOX_DASHES: usize = 3;

/// Output format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// `.png` (or no extension) and `.svg`, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use edakit_plot::render::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_path(Path::new("a/b.SVG")).unwrap(), ImageFormat::Svg);
    /// assert!(ImageFormat::from_path(Path::new("a/b.gif")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let Some(extension) = path.extension() else {
            return Ok(Self::Png);
        };
        match extension.to_string_lossy().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(RenderError::UnsupportedFormat {
                extension: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    #[display("unsupported image format {extension:?} (expected png or svg)")]
    UnsupportedFormat { extension: String },
    #[display("failed to read font {}", path.display())]
    ReadFont {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("invalid font {name}")]
    InvalidFont { name: String },
    #[display("drawing failed: {message}")]
    Draw { message: String },
}

fn draw_error<E>(error: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Draw {
        message: error.to_string(),
    }
}

/// Proof that a font has been registered for text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFace {
    _registered: (),
}

impl FontFace {
    /// Reads a TrueType/OpenType font and registers it for regular and bold
    /// text.
    ///
    /// The font data is kept for the rest of the process.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let bytes = fs::read(path).map_err(|source| RenderError::ReadFont {
            path: path.to_owned(),
            source,
        })?;
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        let name = path.display().to_string();
        register(&name, FontStyle::Normal, bytes)?;
        register(&name, FontStyle::Bold, bytes)?;
        tracing::debug!(path = %path.display(), "registered font");
        Ok(Self { _registered: () })
    }

    /// Registers the bundled DejaVu Sans regular and bold faces.
    pub fn bundled() -> Result<Self, RenderError> {
        register("DejaVu Sans", FontStyle::Normal, BUNDLED_REGULAR)?;
        register("DejaVu Sans Bold", FontStyle::Bold, BUNDLED_BOLD)?;
        Ok(Self { _registered: () })
    }
}

fn register(name: &str, style: FontStyle, bytes: &'static [u8]) -> Result<(), RenderError> {
    plotters::style::register_font(FONT_FAMILY, style, bytes).map_err(|_| {
        RenderError::InvalidFont {
            name: name.to_owned(),
        }
    })
}

/// Draws figures to image files.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    font: Option<FontFace>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer using the bundled font.
    ///
    /// If the bundled font cannot be registered, figures are drawn without
    /// text and a warning is logged.
    #[must_use]
    pub fn new() -> Self {
        match FontFace::bundled() {
            Ok(font) => Self { font: Some(font) },
            Err(error) => {
                tracing::warn!(%error, "no usable font, figures are drawn without text");
                Self { font: None }
            }
        }
    }

    #[must_use]
    pub fn with_font(mut self, font: FontFace) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn draws_text(&self) -> bool {
        self.font.is_some()
    }

    /// Writes `figure` to `path` in the format implied by its extension.
    ///
    /// Axis limits are checked before the file is created, so a figure that
    /// cannot be drawn leaves no file behind.
    pub fn render_to_file(&self, figure: &Figure, path: &Path) -> Result<(), RenderError> {
        let format = ImageFormat::from_path(path)?;
        check_limits(figure)?;
        let dimensions = figure.size.pixels();
        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, dimensions).into_drawing_area();
                self.draw_figure(figure, &root)?;
                root.present().map_err(draw_error)
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, dimensions).into_drawing_area();
                self.draw_figure(figure, &root)?;
                root.present().map_err(draw_error)
            }
        }
    }

    fn draw_figure<DB: DrawingBackend>(
        &self,
        figure: &Figure,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_error)?;

        let area = match (&figure.title, self.draws_text()) {
            (Some(title), true) => {
                let weight = if title.bold {
                    FontStyle::Bold
                } else {
                    FontStyle::Normal
                };
                let font = FontDesc::new(
                    FontFamily::SansSerif,
                    figure.size.points_to_pixels(title.size),
                    weight,
                )
                .color(&rgb(title.color));
                root.titled(&title.text, font).map_err(draw_error)?
            }
            _ => root.clone(),
        };

        let (heights, gap) = figure.panel_heights(area.dim_in_pixel().1);
        let mut rest = area;
        for (index, (panel, height)) in figure.panels.iter().zip(heights).enumerate() {
            let (current, below) = rest.split_vertically(height);
            self.draw_panel(figure, index, panel, &current)?;
            rest = if gap > 0 {
                below.split_vertically(gap).1
            } else {
                below
            };
        }
        Ok(())
    }

    #[expect(clippy::too_many_lines)]
    fn draw_panel<DB: DrawingBackend>(
        &self,
        figure: &Figure,
        index: usize,
        panel: &Panel,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        let px = |points: f64| figure.size.points_to_pixels(points);
        let x = figure.x_limits(index);
        let y = panel.y_limits();
        let text = self.draws_text();
        let x_labels = !figure.share_x || index + 1 == figure.panels.len();

        let mut builder = ChartBuilder::on(area);
        builder.margin(px(PANEL_MARGIN));
        if text {
            let tick_area = px(TICK_LABEL_SIZE * 2.0);
            let title_area = px(AXIS_TITLE_SIZE * 1.5);
            let x_area = if x_labels { tick_area } else { 0.0 }
                + if panel.x_title.is_some() { title_area } else { 0.0 };
            // keep plot areas aligned across panels sharing x
            let y_area = tick_area * 2.0
                + if panel.y_title.is_some() { title_area } else { 0.0 };
            builder.x_label_area_size(x_area).y_label_area_size(y_area);
        }
        let mut chart = builder
            .build_cartesian_2d(x.min..x.max, y.min..y.max)
            .map_err(draw_error)?;

        if text {
            let label_font = FontDesc::new(
                FontFamily::SansSerif,
                px(TICK_LABEL_SIZE),
                FontStyle::Normal,
            );
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .axis_style(WHITE)
                .x_labels(TICK_TARGET)
                .y_labels(TICK_TARGET)
                .label_style(label_font);
            if !x_labels {
                mesh.disable_x_axis();
            }
            if !panel.y_ticks {
                mesh.disable_y_axis();
            }
            if let Some(title) = &panel.x_title {
                mesh.x_desc(title.as_str());
            }
            if let Some(title) = &panel.y_title {
                mesh.y_desc(title.as_str());
            }
            mesh.draw().map_err(draw_error)?;
        }

        if panel.grid {
            let grid = LineStyle::dashed(Rgb::GRAY).with_width(0.8).with_alpha(0.5);
            let mut lines = x
                .ticks(TICK_TARGET)
                .into_iter()
                .map(|tick| [(tick, y.min), (tick, y.max)])
                .collect::<Vec<_>>();
            if panel.y_ticks {
                lines.extend(
                    y.ticks(TICK_TARGET)
                        .into_iter()
                        .map(|tick| [(x.min, tick), (x.max, tick)]),
                );
            }
            let style = shape(grid, px);
            chart
                .draw_series(
                    lines
                        .iter()
                        .flat_map(|&[from, to]| dash_segments(from, to, GRID_DASHES))
                        .map(|segment| PathElement::new(segment.to_vec(), style)),
                )
                .map_err(draw_error)?;
        }

        for element in &panel.elements {
            match element {
                Element::Box(b) => {
                    let s = &b.summary;
                    let half = b.height / 2.0;
                    let cap = half / 2.0;
                    let outline = ShapeStyle {
                        color: RGBColor(0x3d, 0x3d, 0x3d).to_rgba(),
                        filled: false,
                        stroke_width: stroke(px(1.0)),
                    };
                    chart
                        .draw_series([Rectangle::new(
                            [(s.q1, -half), (s.q3, half)],
                            rgb(b.fill).mix(0.75).filled(),
                        )])
                        .map_err(draw_error)?;
                    chart
                        .draw_series(
                            [
                                vec![
                                    (s.q1, -half),
                                    (s.q3, -half),
                                    (s.q3, half),
                                    (s.q1, half),
                                    (s.q1, -half),
                                ],
                                vec![(s.whisker_low, 0.0), (s.q1, 0.0)],
                                vec![(s.q3, 0.0), (s.whisker_high, 0.0)],
                                vec![(s.whisker_low, -cap), (s.whisker_low, cap)],
                                vec![(s.whisker_high, -cap), (s.whisker_high, cap)],
                            ]
                            .into_iter()
                            .map(|points| PathElement::new(points, outline)),
                        )
                        .map_err(draw_error)?;
                    for (at, style) in [(s.median, b.median), (s.mean, b.mean)] {
                        draw_line(&mut chart, &[(at, -half), (at, half)], style, BOX_DASHES, px)?;
                    }
                    chart
                        .draw_series(s.outliers.iter().map(|&v| {
                            Circle::new((v, 0.0), stroke(px(2.5)), outline)
                        }))
                        .map_err(draw_error)?;
                }
                Element::Bars(bars) => {
                    let fill = rgb(bars.fill).mix(bars.alpha).filled();
                    let edge = ShapeStyle {
                        color: rgb(bars.edge).to_rgba(),
                        filled: false,
                        stroke_width: stroke(px(0.75)),
                    };
                    chart
                        .draw_series(bars.bars.iter().map(|bar| {
                            Rectangle::new([(bar.left, 0.0), (bar.right, bar.height)], fill)
                        }))
                        .map_err(draw_error)?;
                    chart
                        .draw_series(bars.bars.iter().map(|bar| {
                            Rectangle::new([(bar.left, 0.0), (bar.right, bar.height)], edge)
                        }))
                        .map_err(draw_error)?;
                }
                Element::Line(line) => {
                    draw_line(&mut chart, &line.points, line.style, REFERENCE_DASHES, px)?;
                }
                Element::Scatter(scatter) => {
                    let style = rgb(scatter.color).filled();
                    chart
                        .draw_series(
                            scatter
                                .points
                                .iter()
                                .map(|&p| Circle::new(p, stroke(px(scatter.radius)), style)),
                        )
                        .map_err(draw_error)?;
                }
                Element::VerticalLine(r) => {
                    let points = [(r.at, y.min), (r.at, y.max)];
                    draw_line(&mut chart, &points, r.style, REFERENCE_DASHES, px)?;
                }
                Element::HorizontalLine(r) => {
                    let points = [(x.min, r.at), (x.max, r.at)];
                    draw_line(&mut chart, &points, r.style, REFERENCE_DASHES, px)?;
                }
            }
        }

        if text && panel.legend {
            let key_length = i32::try_from(stroke(px(20.0))).unwrap_or(i32::MAX);
            for (label, style) in panel.legend_entries() {
                let key = shape(LineStyle { dash: Dash::Solid, ..style }, px);
                chart
                    .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
                    .map_err(draw_error)?
                    .label(label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + key_length, y)], key)
                    });
            }
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font(FontDesc::new(
                    FontFamily::SansSerif,
                    px(LEGEND_SIZE),
                    FontStyle::Normal,
                ))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.2))
                .draw()
                .map_err(draw_error)?;
        }

        Ok(())
    }
}

fn draw_line<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    points: &[(f64, f64)],
    style: LineStyle,
    dashes: usize,
    px: impl Fn(f64) -> f64,
) -> Result<(), RenderError> {
    let shape_style = shape(style, px);
    match style.dash {
        Dash::Solid => {
            chart
                .draw_series([PathElement::new(points.to_vec(), shape_style)])
                .map_err(draw_error)?;
        }
        Dash::Dashed => {
            chart
                .draw_series(
                    points
                        .windows(2)
                        .flat_map(|pair| dash_segments(pair[0], pair[1], dashes))
                        .map(|segment| PathElement::new(segment.to_vec(), shape_style)),
                )
                .map_err(draw_error)?;
        }
    }
    Ok(())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stroke(pixels: f64) -> u32 {
    pixels.round().max(1.0) as u32
}

fn shape(style: LineStyle, px: impl Fn(f64) -> f64) -> ShapeStyle {
    ShapeStyle {
        color: rgb(style.color).mix(style.alpha),
        filled: false,
        stroke_width: stroke(px(style.width)),
    }
}

/// Splits the segment `from`-`to` into `dashes` dashes, each followed by a
/// gap of 40% of the dash period.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn dash_segments(from: (f64, f64), to: (f64, f64), dashes: usize) -> Vec<[(f64, f64); 2]> {
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    let period = 1.0 / dashes.max(1) as f64;
    (0..dashes.max(1))
        .map(|i| {
            let start = i as f64 * period;
            [lerp(start), lerp(start + period * 0.6)]
        })
        .collect()
}

fn check_limits(figure: &Figure) -> Result<(), RenderError> {
    for (index, panel) in figure.panels.iter().enumerate() {
        let x = figure.x_limits(index);
        let y = panel.y_limits();
        if !is_drawable(x) || !is_drawable(y) {
            return Err(RenderError::Draw {
                message: format!("degenerate axis limits in panel {index}: x {x:?}, y {y:?}"),
            });
        }
    }
    Ok(())
}

/// Returns `true` when `limits` can back a chart axis.
#[must_use]
pub fn is_drawable(limits: Limits) -> bool {
    limits.min.is_finite() && limits.max.is_finite() && limits.max > limits.min
}
