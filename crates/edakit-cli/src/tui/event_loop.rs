use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop that renders only after a state change.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        // Initial render is required on startup
        Self { dirty: true }
    }

    /// Returns the next event.
    ///
    /// Yields [`TuiEvent::Render`] once after every terminal event, and blocks
    /// on the terminal otherwise.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(event.into())
    }
}
