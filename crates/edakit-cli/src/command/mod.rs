use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    describe::DescribeArg, distribution::DistributionArg, f_test::FTestArg,
    residuals::ResidualsArg,
};

mod describe;
mod distribution;
mod f_test;
mod figure_output;
mod residuals;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log everything down to trace level on stderr
    #[arg(long, global = true)]
    debug: bool,
    /// What to compute or plot
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print descriptive statistics of a column
    Describe(#[clap(flatten)] DescribeArg),
    /// Compare the variances of two columns with an F-test
    FTest(#[clap(flatten)] FTestArg),
    /// Plot a box plot over a histogram with a density curve
    Distribution(#[clap(flatten)] DistributionArg),
    /// Plot standardized residuals against observation index
    Residuals(#[clap(flatten)] ResidualsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.debug);
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::FTest(arg) => f_test::run(&arg)?,
        Mode::Distribution(arg) => distribution::run(&arg)?,
        Mode::Residuals(arg) => residuals::run(&arg)?,
    }
    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` applies, `--debug` forces trace.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
