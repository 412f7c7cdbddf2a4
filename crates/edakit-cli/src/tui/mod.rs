//! Minimal terminal runtime for interactive viewers.

mod app;
mod event;
mod event_loop;
mod runner;

pub use self::{app::App, runner::Tui};
