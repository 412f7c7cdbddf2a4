use crossterm::event::Event;
use ratatui::Frame;

/// Trait for applications executed by [`Tui::run`](super::Tui::run).
pub trait App {
    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, event: &Event);

    /// Draws the screen.
    fn draw(&self, frame: &mut Frame);
}
