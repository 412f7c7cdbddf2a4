use std::path::PathBuf;

use anyhow::Context as _;
use edakit_stats::variance_test::{DEFAULT_ALPHA, VarianceTest};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FTestArg {
    /// Table JSON file (an object mapping column names to number arrays)
    table: PathBuf,
    /// First group
    #[arg(long)]
    column_a: String,
    /// Second group
    #[arg(long)]
    column_b: String,
    /// Label of the first group in the report [default: column name]
    #[arg(long)]
    label_a: Option<String>,
    /// Label of the second group in the report [default: column name]
    #[arg(long)]
    label_b: Option<String>,
    /// Significance level
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FTestArg) -> anyhow::Result<()> {
    let table = util::read_table(&arg.table)?;
    let a = util::select_column(&table, &arg.table, &arg.column_a)?;
    let b = util::select_column(&table, &arg.table, &arg.column_b)?;

    let result = VarianceTest::new()
        .with_labels(
            arg.label_a.as_deref().unwrap_or(&arg.column_a),
            arg.label_b.as_deref().unwrap_or(&arg.column_b),
        )
        .with_alpha(arg.alpha)
        .compare(a, b)
        .with_context(|| format!("Failed to compare {} and {}", arg.column_a, arg.column_b))?;
    tracing::debug!(
        f = result.f_statistic,
        p = result.p_value,
        "variance test finished"
    );

    Output::from_output_path(arg.output.clone())?.write_text(&result.report())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_table(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("table.json");
        fs::write(&path, contents).unwrap();
        path
    }

    fn arg(table: PathBuf, output: Option<PathBuf>) -> FTestArg {
        FTestArg {
            table,
            column_a: "antes".to_owned(),
            column_b: "depois".to_owned(),
            label_a: None,
            label_b: Some("Depois".to_owned()),
            alpha: DEFAULT_ALPHA,
            output,
        }
    }

    #[test]
    fn test_report_uses_labels() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_table(
            &dir,
            r#"{ "antes": [1, 2, 3, 4, 5], "depois": [2, 4, 6, 8, 10, 12] }"#,
        );
        let output = dir.path().join("report.txt");
        run(&arg(table, Some(output.clone()))).unwrap();

        let report = fs::read_to_string(output).unwrap();
        assert!(report.contains("(antes vs. Depois)"));
        assert!(report.contains("Decisão:"));
    }

    #[test]
    fn test_too_few_values() {
        let dir = tempfile::tempdir().unwrap();
        let table = write_table(&dir, r#"{ "antes": [1], "depois": [2, 4, 6] }"#);
        let err = run(&arg(table, None)).unwrap_err();
        assert!(err.to_string().contains("Failed to compare antes and depois"));
    }
}
