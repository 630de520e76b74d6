//! Validation helpers and regex patterns

use crate::schema::GraphSettings;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #1f77b4)
pub static HEX_COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern"));

/// Validate a categorical palette
pub fn validate_palette(palette: &[String]) -> Result<(), ValidationError> {
    if palette.is_empty() {
        return Err(ValidationError::new("empty_palette"));
    }

    if palette.iter().all(|color| HEX_COLOR_REGEX.is_match(color)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_palette_color"))
    }
}

/// Validate a CSV record terminator
pub fn validate_line_ending(line_ending: &str) -> Result<(), ValidationError> {
    match line_ending {
        "\n" | "\r\n" => Ok(()),
        _ => Err(ValidationError::new("invalid_line_ending")),
    }
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

/// The margins must leave a non-empty plot area on both axes
pub fn validate_plot_area(settings: &GraphSettings) -> Result<(), ValidationError> {
    let doubled = settings.margin.saturating_mul(2);
    if settings.width > doubled && settings.height > doubled {
        Ok(())
    } else {
        let mut error = ValidationError::new("empty_plot_area");
        error.message = Some("Margins leave no room for the plot area".into());
        Err(error)
    }
}
