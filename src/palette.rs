//! Display colors assigned to compared packages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Colors handed out in order to successfully loaded packages.
pub const DEFAULT_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette must contain at least one color")]
    Empty,
}

/// An ordered, non-empty list of color tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    pub fn new(colors: Vec<String>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Color for the `index`-th valid package. Wraps around past the end.
    pub fn color_for(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for ColorPalette {
    type Error = PaletteError;

    fn try_from(colors: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<ColorPalette> for Vec<String> {
    fn from(palette: ColorPalette) -> Self {
        palette.colors
    }
}
