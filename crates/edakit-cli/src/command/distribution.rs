use std::path::PathBuf;

use anyhow::Context as _;
use edakit_plot::distribution::{DEFAULT_FILE_NAME, DEFAULT_TITLE, DistributionPlot};
use edakit_stats::histogram::Binning;

use super::figure_output::FigureOutputArg;
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DistributionArg {
    /// Table JSON file (an object mapping column names to number arrays)
    table: PathBuf,
    /// Column to plot
    #[arg(long)]
    column: String,
    /// Bin count, or a rule: auto, fd, sturges, sqrt, rice, scott, doane
    #[arg(long, default_value_t = Binning::default())]
    bins: Binning,
    /// Figure title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,
    #[clap(flatten)]
    output: FigureOutputArg,
}

pub(crate) fn run(arg: &DistributionArg) -> anyhow::Result<()> {
    let sample = util::read_column(&arg.table, &arg.column)?;
    let style = arg.output.read_style()?;

    let figure = DistributionPlot::new()
        .with_binning(arg.bins)
        .with_title(&arg.title)
        .with_style(style.clone())
        .render(&sample)
        .with_context(|| format!("Column {:?} has no finite values to plot", arg.column))?;

    arg.output.emit(&figure, &style, DEFAULT_FILE_NAME)
}
