use std::path::PathBuf;

use edakit_plot::{figure::Figure, persist::DEFAULT_DIR, style::FigureStyle};

use crate::{util, view};

/// Where a plotting command sends its figure.
///
/// Without `--save` the figure is shown in the terminal; with it the figure
/// is written into `--output-dir`, and `--show` displays it as well.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct FigureOutputArg {
    /// Save the figure, optionally under the given file name
    #[arg(long, num_args = 0..=1, value_name = "FILE_NAME")]
    save: Option<Option<String>>,
    /// Directory saved figures are written to
    #[arg(long, default_value = DEFAULT_DIR)]
    output_dir: PathBuf,
    /// Show the figure in the terminal even when saving it
    #[arg(long)]
    show: bool,
    /// JSON file overriding figure size, DPI and font
    #[arg(long)]
    style: Option<PathBuf>,
    /// TrueType/OpenType font used for titles, ticks and legends
    #[arg(long)]
    font: Option<PathBuf>,
}

impl FigureOutputArg {
    pub(crate) fn read_style(&self) -> anyhow::Result<FigureStyle> {
        util::read_style_file(self.style.as_deref())
    }

    fn shows(&self) -> bool {
        self.show || self.save.is_none()
    }

    /// Saves and/or shows the figure.
    ///
    /// A failed save or an unusable font is reported and does not stop the
    /// command.
    pub(crate) fn emit(
        &self,
        figure: &Figure,
        style: &FigureStyle,
        default_file_name: &str,
    ) -> anyhow::Result<()> {
        if let Some(file_name) = &self.save {
            let renderer = util::build_renderer(self.font.as_deref(), style);
            let file_name = file_name.as_deref().unwrap_or(default_file_name);
            let outcome = renderer.persist(figure, &self.output_dir, file_name);
            util::report_persist(&outcome);
        }
        if self.shows() {
            view::show(figure)?;
        }
        Ok(())
    }
}
