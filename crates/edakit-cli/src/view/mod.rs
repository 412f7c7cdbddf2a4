//! Interactive terminal viewer for figures.
//!
//! Each panel of a [`Figure`] becomes a ratatui chart; the layout follows the
//! panels' height ratios and, when the figure shares its x axis, every panel
//! uses the same bounds.

mod figure_viewer;
mod panel_chart;

use edakit_plot::figure::Figure;

use self::figure_viewer::FigureViewer;
use crate::tui::Tui;

/// Shows `figure` in the terminal until `q` or `Esc` is pressed.
pub fn show(figure: &Figure) -> anyhow::Result<()> {
    tracing::debug!(panels = figure.panels.len(), "opening figure viewer");
    let mut app = FigureViewer::new(figure);
    Tui::new().run(&mut app)
}
