//! Test utilities and shared fixtures for the UI utility crates.
//!
//! Fixtures are plain data (string rows, JSON documents) so that every crate
//! in the workspace can build its own model types from them.

use crate::logging::{init_logging_with_writer, LoggingConfig};
use std::sync::Once;
use tracing_subscriber::fmt::TestWriter;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests at debug level.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ansi: false,
            ..LoggingConfig::default()
        };
        // Another harness may already own the global subscriber.
        let _ = init_logging_with_writer(config, TestWriter::new());
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Table contents used across table tests.
pub mod table_fixtures {
    /// Header of the two-column score table.
    pub fn score_header() -> Vec<&'static str> {
        vec!["Name", "Score"]
    }

    /// Body of the two-column score table.
    pub fn score_rows() -> Vec<Vec<&'static str>> {
        vec![vec!["Alice", "90"], vec!["Bob", "80"]]
    }

    /// Body rows of a submitter table, first column reserved for a checkbox.
    pub fn submitter_rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["", "GeneDx", "1204"],
            vec!["", "Invitae", "980"],
            vec!["", "OMIM", "455"],
            vec!["", "Ambry Genetics", "312"],
            vec!["", "LabCorp Genetics", "97"],
        ]
    }
}

/// Observation documents used across graph tests.
pub mod graph_fixtures {
    /// Two series over two years; B ends higher than A.
    pub fn two_series_json() -> &'static str {
        r#"[
            {"x": "2020", "y": 10, "serie": "A"},
            {"x": "2020", "y": 5, "serie": "B"},
            {"x": "2021", "y": 8, "serie": "A"},
            {"x": "2021", "y": 12, "serie": "B"}
        ]"#
    }

    /// A single series over three years.
    pub fn single_series_json() -> &'static str {
        r#"[
            {"x": "2019-01-01", "y": 3, "serie": "pathogenic"},
            {"x": "2020-01-01", "y": 7, "serie": "pathogenic"},
            {"x": "2021-01-01", "y": 11, "serie": "pathogenic"}
        ]"#
    }

    /// Three series with monthly points, two of them tied on their latest value.
    pub fn tied_series_json() -> &'static str {
        r#"[
            {"x": "2018-06", "y": 4, "serie": "benign"},
            {"x": "2018-06", "y": 9, "serie": "uncertain"},
            {"x": "2018-06", "y": 2, "serie": "pathogenic"},
            {"x": "2019-06", "y": 6, "serie": "benign"},
            {"x": "2019-06", "y": 6, "serie": "uncertain"},
            {"x": "2019-06", "y": 1, "serie": "pathogenic"}
        ]"#
    }
}
