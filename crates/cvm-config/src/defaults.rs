//! Default values, matching the conventions the page markup was written against.

use crate::schema::*;

/// The d3 `schemeCategory10` palette.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tables: TablesConfig::default(),
            csv: CsvConfig::default(),
            graph: GraphSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        // The sorter's stock class names are backwards relative to the
        // stylesheet, so ascending gets "desc" and vice versa.
        Self {
            sortable_class: "sortable".to_string(),
            filterable_class: "filterable".to_string(),
            css_asc: "desc".to_string(),
            css_desc: "asc".to_string(),
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            quote_escaping: QuoteEscaping::All,
            mime: "text/csv; charset=utf-8".to_string(),
            line_ending: "\n".to_string(),
        }
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            surface_id: "graph".to_string(),
            width: 800,
            height: 600,
            margin: 100,
            palette: CATEGORY10.iter().map(|c| (*c).to_string()).collect(),
            background_color: "#ffffff".to_string(),
            axis_color: "#000000".to_string(),
            total_label: "total".to_string(),
            line_width: 2,
            legend_offset_x: 50,
            legend_swatch_width: 20,
            legend_swatch_stroke: 5,
            font_family: "sans-serif".to_string(),
            font_size: 10,
            tick_size: 6,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_targets: true,
        }
    }
}
