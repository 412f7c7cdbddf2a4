use crossterm::event::{Event, KeyCode, KeyEventKind};
use edakit_plot::figure::Figure;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Widget,
};

use super::panel_chart::{PanelChart, terminal_color};
use crate::tui::App;

/// Smallest layout weight a panel gets, so that thin panels stay readable.
const MIN_FILL_WEIGHT: u16 = 5;

#[derive(Debug)]
pub(super) struct FigureViewer<'a> {
    figure: &'a Figure,
    should_exit: bool,
}

impl<'a> FigureViewer<'a> {
    pub(super) fn new(figure: &'a Figure) -> Self {
        Self {
            figure,
            should_exit: false,
        }
    }
}

impl App for FigureViewer<'_> {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key_event) = event
            && key_event.kind == KeyEventKind::Press
            && matches!(key_event.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            self.should_exit = true;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(FigureView(self.figure), frame.area());
    }
}

struct FigureView<'a>(&'a Figure);

impl Widget for FigureView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let figure = self.0;
        let [title_area, body, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(title) = &figure.title {
            let mut style = Style::default().fg(terminal_color(title.color));
            if title.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            Line::styled(title.text.as_str(), style)
                .centered()
                .render(title_area, buf);
        }

        let panes = Layout::vertical(
            figure
                .panels
                .iter()
                .map(|panel| Constraint::Fill(fill_weight(panel.height_ratio))),
        )
        .split(body);
        for (index, (panel, pane)) in figure.panels.iter().zip(panes.iter()).enumerate() {
            PanelChart::new(panel, figure.x_limits(index)).render(*pane, buf);
        }

        Line::styled(" q/Esc: quit", Style::default().fg(Color::DarkGray)).render(help_area, buf);
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fill_weight(height_ratio: f64) -> u16 {
    ((height_ratio * 20.0).round().clamp(0.0, f64::from(u16::MAX)) as u16).max(MIN_FILL_WEIGHT)
}
