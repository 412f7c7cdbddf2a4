use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use edakit_plot::{
    persist::PersistOutcome,
    render::{FontFace, Renderer},
    style::FigureStyle,
};
use edakit_stats::sample::Sample;

use crate::data::Table;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }

    pub fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

pub fn read_table<P>(path: P) -> anyhow::Result<Table>
where
    P: AsRef<Path>,
{
    read_json_file("table", path)
}

/// Reads a table file and returns a copy of one of its columns.
pub fn read_column<P>(path: P, column: &str) -> anyhow::Result<Sample>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let table = read_table(path)?;
    select_column(&table, path, column).cloned()
}

pub fn select_column<'a>(
    table: &'a Table,
    path: &Path,
    column: &str,
) -> anyhow::Result<&'a Sample> {
    table
        .column(column)
        .with_context(|| format!("Failed to select column in {}", path.display()))
}

/// Loads the figure style file, or the defaults when none is given.
pub fn read_style_file(path: Option<&Path>) -> anyhow::Result<FigureStyle> {
    path.map_or_else(|| Ok(FigureStyle::default()), |path| read_json_file("style", path))
}

/// Builds a renderer, registering the font from `--font` or the style file.
///
/// A font that cannot be loaded is reported and the bundled font is used
/// instead.
pub fn build_renderer(font: Option<&Path>, style: &FigureStyle) -> Renderer {
    let renderer = Renderer::new();
    let Some(font) = font.or(style.font.as_deref()) else {
        return renderer;
    };
    match FontFace::load(font) {
        Ok(face) => renderer.with_font(face),
        Err(error) => {
            tracing::warn!(%error, "failed to load font, using the bundled one");
            renderer
        }
    }
}

/// Reports a save attempt to the user; failures do not stop the command.
pub fn report_persist(outcome: &PersistOutcome) {
    match outcome {
        PersistOutcome::Saved { path } => println!("Gráfico salvo em: {}", path.display()),
        PersistOutcome::Failed { path, error } => {
            eprintln!("Erro ao salvar o arquivo {}: {error}", path.display());
        }
    }
}
