use std::path::PathBuf;

use edakit_stats::descriptive::{DescriptiveStats, Statistic};

use crate::util::{self, Output};

const LABEL_WIDTH: usize = 22;
const VALUE_WIDTH: usize = 14;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Table JSON file (an object mapping column names to number arrays)
    table: PathBuf,
    /// Column to summarize
    #[arg(long)]
    column: String,
    /// Print the statistics as a JSON object keyed by label
    #[arg(long)]
    json: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg {
        table,
        column,
        json,
        output,
    } = arg;

    let sample = util::read_column(table, column)?;
    let stats = DescriptiveStats::new(&sample);
    tracing::debug!(column, count = stats.count, "computed descriptive statistics");

    if *json {
        Output::save_json(&stats, output.clone())
    } else {
        Output::from_output_path(output.clone())?.write_text(&format_stats(column, &stats))
    }
}

fn format_stats(column: &str, stats: &DescriptiveStats) -> String {
    let header = format!("Estatísticas descritivas: {column} (n = {})", stats.count);
    let rule = "-".repeat(header.chars().count());
    let rows = stats.iter().map(|(statistic, value)| {
        let label = statistic.to_string();
        let row = format!("  {label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$.4}");
        if statistic == Statistic::Mode && stats.mode.is_repeated() {
            format!("{row}  ({} ocorrências)", stats.mode.count)
        } else {
            row
        }
    });
    let mut lines = vec![header, rule];
    lines.extend(rows);
    lines.push(String::new());
    lines.join("\n")
}
