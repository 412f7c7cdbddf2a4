use edakit_plot::figure::{Element, Limits, Panel, Rgb};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::{Marker, merge::MergeStrategy},
    widgets::{Axis, Block, Chart, Dataset, GraphType, Widget},
};

/// A figure panel drawn as a ratatui [`Chart`].
pub(super) struct PanelChart<'a> {
    panel: &'a Panel,
    x_limits: Limits,
}

impl<'a> PanelChart<'a> {
    pub(super) fn new(panel: &'a Panel, x_limits: Limits) -> Self {
        Self { panel, x_limits }
    }
}

impl Widget for PanelChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let x = self.x_limits;
        let y = self.panel.y_limits();
        let series = panel_series(self.panel, x, y);
        let datasets = series
            .iter()
            .map(|s| {
                let dataset = Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(s.graph)
                    .style(Style::default().fg(terminal_color(s.color)))
                    .data(&s.points);
                match &s.name {
                    Some(name) => dataset.name(name.as_str()),
                    None => dataset,
                }
            })
            .collect::<Vec<_>>();

        let mut x_axis = Axis::default()
            .bounds([x.min, x.max])
            .labels(axis_labels(x));
        if let Some(title) = &self.panel.x_title {
            x_axis = x_axis.title(title.as_str());
        }
        let mut y_axis = Axis::default().bounds([y.min, y.max]);
        if self.panel.y_ticks {
            y_axis = y_axis.labels(axis_labels(y));
        }
        if let Some(title) = &self.panel.y_title {
            y_axis = y_axis.title(title.as_str());
        }

        Chart::new(datasets)
            .block(Block::bordered().merge_borders(MergeStrategy::Exact))
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

/// Points of one dataset, ready to hand to a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Series {
    pub name: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub graph: GraphType,
    pub color: Rgb,
}

impl Series {
    fn line(points: Vec<(f64, f64)>, color: Rgb) -> Self {
        Self {
            name: None,
            points,
            graph: GraphType::Line,
            color,
        }
    }
}

/// Converts the elements of a panel into chart series.
///
/// Terminal charts cannot fill areas or dash lines, so boxes become outlines,
/// bars become vertical strokes at their centers and every line is solid.
/// Names are only kept when the panel shows a legend.
pub(super) fn panel_series(panel: &Panel, x: Limits, y: Limits) -> Vec<Series> {
    let mut series = vec![];
    for element in &panel.elements {
        match element {
            Element::Box(b) => {
                let s = &b.summary;
                let h = b.height / 2.0;
                series.push(Series::line(
                    vec![(s.q1, -h), (s.q3, -h), (s.q3, h), (s.q1, h), (s.q1, -h)],
                    b.fill,
                ));
                series.push(Series::line(
                    vec![(s.whisker_low, 0.0), (s.q1, 0.0)],
                    Rgb::BLACK,
                ));
                series.push(Series::line(
                    vec![(s.q3, 0.0), (s.whisker_high, 0.0)],
                    Rgb::BLACK,
                ));
                series.push(Series::line(
                    vec![(s.median, -h), (s.median, h)],
                    b.median.color,
                ));
                series.push(Series::line(vec![(s.mean, -h), (s.mean, h)], b.mean.color));
                if !s.outliers.is_empty() {
                    series.push(Series {
                        name: None,
                        points: s.outliers.iter().map(|&o| (o, 0.0)).collect(),
                        graph: GraphType::Scatter,
                        color: b.fill,
                    });
                }
            }
            Element::Bars(bars) => series.push(Series {
                name: None,
                points: bars
                    .bars
                    .iter()
                    .map(|bar| (f64::midpoint(bar.left, bar.right), bar.height))
                    .collect(),
                graph: GraphType::Bar,
                color: bars.fill,
            }),
            Element::Line(line) => {
                series.push(Series::line(line.points.clone(), line.style.color));
            }
            Element::Scatter(scatter) => series.push(Series {
                name: None,
                points: scatter.points.clone(),
                graph: GraphType::Scatter,
                color: scatter.color,
            }),
            Element::VerticalLine(r) => {
                series.push(Series::line(vec![(r.at, y.min), (r.at, y.max)], r.style.color));
            }
            Element::HorizontalLine(r) => {
                series.push(Series::line(vec![(x.min, r.at), (x.max, r.at)], r.style.color));
            }
        }
        if panel.legend
            && let Some(last) = series.last_mut()
        {
            last.name = element.legend().map(|(label, _)| label.to_owned());
        }
    }
    series
}

fn axis_labels(limits: Limits) -> [String; 3] {
    [
        format!("{:.2}", limits.min),
        format!("{:.2}", f64::midpoint(limits.min, limits.max)),
        format!("{:.2}", limits.max),
    ]
}

/// Maps a figure color to the terminal; black follows the terminal foreground.
pub(super) fn terminal_color(color: Rgb) -> Color {
    if color == Rgb::BLACK {
        return Color::Reset;
    }
    let Rgb(r, g, b) = color;
    Color::Rgb(r, g, b)
}
