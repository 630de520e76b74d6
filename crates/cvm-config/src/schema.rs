//! Configuration schema definitions using serde with validation attributes.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Main configuration structure for the UI utilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UiConfig {
    /// Sortable/filterable table conventions.
    #[validate]
    pub tables: TablesConfig,
    /// CSV export settings.
    #[validate]
    pub csv: CsvConfig,
    /// Line graph layout and styling.
    #[validate]
    pub graph: GraphSettings,
    /// Logging settings.
    #[validate]
    pub logging: LoggingSettings,
}

/// Table markup conventions and sorter class naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TablesConfig {
    /// Class that opts a table into column sorting.
    #[validate(length(min = 1, message = "Sortable marker class cannot be empty"))]
    pub sortable_class: String,
    /// Class that reserves column 0 for per-row checkboxes.
    #[validate(length(min = 1, message = "Filterable marker class cannot be empty"))]
    pub filterable_class: String,
    /// Class the sorter puts on a header sorted ascending.
    #[validate(length(min = 1, message = "Ascending class cannot be empty"))]
    pub css_asc: String,
    /// Class the sorter puts on a header sorted descending.
    #[validate(length(min = 1, message = "Descending class cannot be empty"))]
    pub css_desc: String,
}

impl TablesConfig {
    /// Marker classes must be distinct, and so must the direction classes.
    pub fn validate_markers(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.sortable_class == self.filterable_class {
            errors.add(
                "filterable_class",
                validator::ValidationError::new("marker_classes_must_differ"),
            );
        }

        if self.css_asc == self.css_desc {
            errors.add(
                "css_desc",
                validator::ValidationError::new("direction_classes_must_differ"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// How embedded double quotes are escaped inside CSV fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteEscaping {
    /// Double every embedded quote (RFC 4180).
    #[default]
    All,
    /// Double only the first embedded quote, as the legacy export did.
    FirstOnly,
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CsvConfig {
    /// Quote escaping mode.
    pub quote_escaping: QuoteEscaping,
    /// MIME type of the downloaded resource.
    #[validate(length(min = 1, message = "CSV MIME type cannot be empty"))]
    pub mime: String,
    /// Record terminator.
    #[validate(custom(function = "crate::validation::validate_line_ending", message = "Line ending must be \\n or \\r\\n"))]
    pub line_ending: String,
}

/// Line graph layout and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "crate::validation::validate_plot_area", skip_on_field_errors = false))]
pub struct GraphSettings {
    /// Id of the `<svg>` element the chart is mounted into.
    #[validate(length(min = 1, message = "Graph surface id cannot be empty"))]
    pub surface_id: String,
    /// Total surface width in pixels.
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,
    /// Total surface height in pixels.
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,
    /// Margin on every side of the plot area.
    pub margin: u32,
    /// Categorical palette, cycled by ranked series index.
    #[validate(custom(function = "crate::validation::validate_palette", message = "Palette must be a non-empty list of #RRGGBB colours"))]
    pub palette: Vec<String>,
    /// Surface background colour.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,
    /// Colour of axis lines, ticks and text.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Axis color must be valid hex color"))]
    pub axis_color: String,
    /// Label of the synthesized per-date sum series.
    #[validate(length(min = 1, message = "Total series label cannot be empty"))]
    pub total_label: String,
    /// Stroke width of series lines.
    #[validate(range(min = 1, max = 20, message = "Line width must be between 1 and 20"))]
    pub line_width: u32,
    /// Horizontal offset of the legend inside the plot area. Legend rows are
    /// spaced at 1.25 times the font size.
    pub legend_offset_x: i32,
    /// Length of a legend swatch.
    pub legend_swatch_width: u32,
    /// Stroke width of a legend swatch.
    pub legend_swatch_stroke: u32,
    /// Font family for all chart text.
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,
    /// Font size for all chart text.
    #[validate(range(min = 6, max = 72, message = "Font size must be between 6 and 72"))]
    pub font_size: u32,
    /// Length of axis tick marks.
    pub tick_size: u32,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,
    /// Whether to include target module information in log lines
    pub include_targets: bool,
}

impl UiConfig {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        // First run the derived field validation
        self.validate()?;

        // Then the cross-field rules for table markers
        self.tables.validate_markers()
    }
}

impl From<&LoggingSettings> for cvm_common::LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            include_targets: settings.include_targets,
            ..Self::default()
        }
    }
}
