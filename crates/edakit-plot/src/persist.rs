//! Best-effort saving of figures.
//!
//! Failures are reported as a [`PersistOutcome`] and logged; they never
//! abort the caller.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    figure::Figure,
    render::{RenderError, Renderer},
};

/// Directory figures are saved into unless told otherwise.
pub const DEFAULT_DIR: &str = "images";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistError {
    #[display("failed to create directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[display("failed to save {}", path.display())]
    Render { path: PathBuf, source: RenderError },
}

#[derive(Debug)]
pub enum PersistOutcome {
    Saved { path: PathBuf },
    Failed { path: PathBuf, error: PersistError },
}

impl PersistOutcome {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// Target file, whether or not it was written.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Saved { path } | Self::Failed { path, .. } => path,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&PersistError> {
        match self {
            Self::Saved { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Creates `dir` (and its parents) if it does not exist yet.
///
/// Returns whether the directory was created.
pub fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    Ok(true)
}

impl Renderer {
    /// Saves `figure` as `dir/file_name`.
    ///
    /// A file name without extension gets `.png`.
    pub fn persist(&self, figure: &Figure, dir: &Path, file_name: &str) -> PersistOutcome {
        let mut path = dir.join(file_name);
        if path.extension().is_none() {
            path.set_extension("png");
        }

        match ensure_dir(dir) {
            Ok(true) => tracing::info!(dir = %dir.display(), "created directory"),
            Ok(false) => {}
            Err(source) => {
                let error = PersistError::CreateDir {
                    path: dir.to_owned(),
                    source,
                };
                tracing::warn!(error = %error, cause = %source_message(&error), "figure not saved");
                return PersistOutcome::Failed { path, error };
            }
        }

        match self.render_to_file(figure, &path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved figure");
                PersistOutcome::Saved { path }
            }
            Err(source) => {
                let error = PersistError::Render {
                    path: path.clone(),
                    source,
                };
                tracing::warn!(error = %error, cause = %source_message(&error), "figure not saved");
                PersistOutcome::Failed { path, error }
            }
        }
    }
}

fn source_message(error: &PersistError) -> String {
    match error {
        PersistError::CreateDir { source, .. } => source.to_string(),
        PersistError::Render { source, .. } => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{distribution::DistributionPlot, residual::ResidualPlot};

    const REFERENCE: [f64; 7] = [10.0, 12.0, 14.0, 10.0, 18.0, 20.0, 10.0];

    #[test]
    fn test_creates_directory_and_saves() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("images");
        let figure = DistributionPlot::new().render(&REFERENCE).unwrap();

        let outcome = Renderer::new().persist(&figure, &dir, "distribuicao.png");
        assert!(outcome.is_saved(), "{outcome:?}");
        assert_eq!(outcome.path(), dir.join("distribuicao.png"));
        assert!(outcome.path().is_file());

        // directory already present
        let outcome = Renderer::new().persist(&figure, &dir, "again.svg");
        assert!(outcome.is_saved(), "{outcome:?}");
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        assert!(ensure_dir(&dir).unwrap());
        assert!(!ensure_dir(&dir).unwrap());
    }

    #[test]
    fn test_missing_extension_defaults_to_png() {
        let tmp = TempDir::new().unwrap();
        let figure = ResidualPlot::new().render(&vec![0.5, -1.0]);
        let outcome = Renderer::new().persist(&figure, tmp.path(), "residuos");
        assert_eq!(outcome.path(), tmp.path().join("residuos.png"));
        assert!(outcome.is_saved(), "{outcome:?}");
    }

    #[test]
    fn test_unwritable_directory_is_reported() {
        let tmp = TempDir::new().unwrap();
        // a regular file where the directory should be
        let blocker = tmp.path().join("images");
        fs::write(&blocker, b"").unwrap();
        let figure = DistributionPlot::new().render(&REFERENCE).unwrap();

        let outcome = Renderer::new().persist(&figure, &blocker.join("nested"), "plot.png");
        assert!(matches!(
            outcome.error(),
            Some(PersistError::CreateDir { .. })
        ));
        assert!(!outcome.path().exists());

        // the figure is still usable
        assert_eq!(figure.panels.len(), 2);
    }

    #[test]
    fn test_unsupported_format_is_reported() {
        let tmp = TempDir::new().unwrap();
        let figure = DistributionPlot::new().render(&REFERENCE).unwrap();
        let outcome = Renderer::new().persist(&figure, tmp.path(), "plot.gif");
        assert!(matches!(
            outcome.error(),
            Some(PersistError::Render {
                source: RenderError::UnsupportedFormat { .. },
                ..
            })
        ));
    }
}
