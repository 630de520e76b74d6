//! Categorical colours for series lines and legend swatches.

use cvm_common::{Result, UiError};
use plotters::style::RGBColor;

/// An ordered list of colours, cycled by series index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<RGBColor>,
}

impl Palette {
    /// The d3 `schemeCategory10` colours.
    pub fn category10() -> Self {
        Self {
            colors: vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
                RGBColor(140, 86, 75),   // Brown
                RGBColor(227, 119, 194), // Pink
                RGBColor(127, 127, 127), // Gray
                RGBColor(188, 189, 34),  // Olive
                RGBColor(23, 190, 207),  // Cyan
            ],
        }
    }

    /// Build a palette from `#RRGGBB` strings.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        if colors.is_empty() {
            return Err(UiError::validation_field("palette cannot be empty", "palette"));
        }

        let colors = colors
            .iter()
            .map(|color| parse_color(color.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { colors })
    }

    /// Colour for the series at `index`, wrapping past the end.
    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index % self.colors.len()]
    }

    /// Number of distinct colours.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least one colour.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::category10()
    }
}

/// Parse a `#RRGGBB` colour.
pub fn parse_color(color_str: &str) -> Result<RGBColor> {
    let invalid = || UiError::validation_field(format!("invalid colour '{color_str}'"), "color");

    let hex = color_str.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
