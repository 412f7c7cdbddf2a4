mod command;
mod data;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
