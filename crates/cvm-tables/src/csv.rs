//! CSV export of a table's header and body rows.

use crate::model::{Row, TableSnapshot};
use cvm_config::{CsvConfig, QuoteEscaping};
use tracing::info;

/// A finished export, ready to be handed to the browser as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    /// Suggested file name, `<table id>.csv`.
    pub filename: String,
    /// MIME type of the resource.
    pub mime: String,
    /// CSV text.
    pub body: String,
}

/// Quote one field.
///
/// The text is trimmed, embedded double quotes are doubled according to
/// `mode`, and the result is wrapped in double quotes.
pub fn escape_field(text: &str, mode: QuoteEscaping) -> String {
    let trimmed = text.trim();
    let escaped = match mode {
        QuoteEscaping::All => trimmed.replace('"', "\"\""),
        QuoteEscaping::FirstOnly => trimmed.replacen('"', "\"\"", 1),
    };
    format!("\"{escaped}\"")
}

/// One CSV record from the cells at `start` onward, without a terminator.
pub fn build_record(row: &Row, start: usize, mode: QuoteEscaping) -> String {
    row.cells
        .iter()
        .skip(start)
        .map(|cell| escape_field(&cell.text, mode))
        .collect::<Vec<_>>()
        .join(",")
}

/// The full CSV text of a table: header rows then body rows, each record
/// followed by `line_ending`.
pub fn to_csv(table: &TableSnapshot, mode: QuoteEscaping, line_ending: &str) -> String {
    let start = table.first_data_column();
    table.rows().fold(String::new(), |mut out, row| {
        out.push_str(&build_record(row, start, mode));
        out.push_str(line_ending);
        out
    })
}

/// Export a table with the configured escaping, MIME type and terminator.
pub fn export(table: &TableSnapshot, config: &CsvConfig) -> CsvDownload {
    let body = to_csv(table, config.quote_escaping, &config.line_ending);

    info!(
        table = %table.id,
        records = table.head.len() + table.body.len(),
        bytes = body.len(),
        "Exported table to CSV"
    );

    CsvDownload {
        filename: table.id.csv_filename(),
        mime: config.mime.clone(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableMarkers;

    fn scores(filterable: bool) -> TableSnapshot {
        let markers = TableMarkers {
            sortable: true,
            filterable,
        };
        let rows = [["Alice", "90"], ["Bob", "80"]];
        TableSnapshot::new("scores", markers).with_body_rows(rows.into_iter().map(|texts| {
            if filterable {
                Row::with_checkbox(false, texts)
            } else {
                Row::from_texts(texts)
            }
        }))
    }

    #[test]
    fn test_plain_table_export() {
        let download = export(&scores(false), &CsvConfig::default());
        assert_eq!(download.body, "\"Alice\",\"90\"\n\"Bob\",\"80\"\n");
        assert_eq!(download.filename, "scores.csv");
        assert_eq!(download.mime, "text/csv; charset=utf-8");
    }

    #[test]
    fn test_filterable_table_skips_checkbox_column() {
        let download = export(&scores(true), &CsvConfig::default());
        assert_eq!(download.body, "\"Alice\",\"90\"\n\"Bob\",\"80\"\n");
    }

    #[test]
    fn test_header_rows_come_first() {
        let table = scores(false).with_head_row(Row::from_texts(["Name", "Score"]));
        let csv = to_csv(&table, QuoteEscaping::All, "\n");
        assert!(csv.starts_with("\"Name\",\"Score\"\n\"Alice\""));
    }

    #[test]
    fn test_escape_field_modes() {
        assert_eq!(escape_field("a\"b\"c", QuoteEscaping::All), "\"a\"\"b\"\"c\"");
        // Legacy export only doubled the first quote.
        assert_eq!(escape_field("a\"b\"c", QuoteEscaping::FirstOnly), "\"a\"\"b\"c\"");
        assert_eq!(escape_field("plain", QuoteEscaping::FirstOnly), "\"plain\"");
    }

    #[test]
    fn test_escape_field_trims() {
        assert_eq!(escape_field("  GeneDx \n", QuoteEscaping::All), "\"GeneDx\"");
        assert_eq!(escape_field("", QuoteEscaping::All), "\"\"");
    }

    #[test]
    fn test_build_record_past_row_end() {
        let row = Row::from_texts(["only"]);
        assert_eq!(build_record(&row, 1, QuoteEscaping::All), "");
        assert_eq!(build_record(&row, 0, QuoteEscaping::All), "\"only\"");
    }

    #[test]
    fn test_crlf_line_ending() {
        let mut config = CsvConfig::default();
        config.line_ending = "\r\n".to_string();
        let download = export(&scores(false), &config);
        assert_eq!(download.body, "\"Alice\",\"90\"\r\n\"Bob\",\"80\"\r\n");
    }

    #[test]
    fn test_empty_table_exports_nothing() {
        let table = TableSnapshot::new("empty", TableMarkers::default());
        assert_eq!(export(&table, &CsvConfig::default()).body, "");
    }
}
