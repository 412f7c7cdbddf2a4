use std::path::PathBuf;

use edakit_plot::residual::{DEFAULT_FILE_NAME, ResidualPlot};

use super::figure_output::FigureOutputArg;
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ResidualsArg {
    /// Table JSON file (an object mapping column names to number arrays)
    table: PathBuf,
    /// Column holding the standardized residuals of a fitted model
    #[arg(long)]
    column: String,
    #[clap(flatten)]
    output: FigureOutputArg,
}

pub(crate) fn run(arg: &ResidualsArg) -> anyhow::Result<()> {
    let residuals = util::read_column(&arg.table, &arg.column)?;
    let style = arg.output.read_style()?;
    if residuals.is_empty() {
        tracing::warn!(column = %arg.column, "no residuals to plot");
    }

    let figure = ResidualPlot::new().with_style(style.clone()).render(&residuals);
    arg.output.emit(&figure, &style, DEFAULT_FILE_NAME)
}
