use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::figure::FigureSize;

/// Resolution used when saving figures.
pub const DEFAULT_DPI: f64 = 300.0;

/// User overrides for figure output, usually loaded from a JSON file.
///
/// Missing fields keep the per-plot defaults.
///
/// # Examples
///
/// ```
/// use edakit_plot::style::FigureStyle;
///
/// let style: FigureStyle = serde_json::from_str(r#"{ "width": 10.0, "dpi": 100.0 }"#).unwrap();
/// let size = style.size(6.4, 4.8);
/// assert_eq!(size.pixels(), (1000, 480));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureStyle {
    /// Width in inches.
    pub width: Option<f64>,
    /// Height in inches.
    pub height: Option<f64>,
    pub dpi: Option<f64>,
    /// TrueType/OpenType font used for titles, ticks and legends.
    pub font: Option<PathBuf>,
}

impl FigureStyle {
    /// Resolves the figure size, falling back to the given defaults.
    #[must_use]
    pub fn size(&self, default_width: f64, default_height: f64) -> FigureSize {
        FigureSize {
            width_in: self.width.unwrap_or(default_width),
            height_in: self.height.unwrap_or(default_height),
            dpi: self.dpi.unwrap_or(DEFAULT_DPI),
        }
    }
}
