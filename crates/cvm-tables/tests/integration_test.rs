//! Integration tests for cvm-tables crate.
//!
//! These tests drive the table behaviors over snapshots built from the shared
//! fixtures, the way the browser adapter does.

use cvm_common::test_utils::{init_test_logging, table_fixtures};
use cvm_common::{Result, TableId, UiError};
use cvm_config::{CsvConfig, QuoteEscaping, TablesConfig};
use cvm_tables::{csv, filter, *};
use proptest::prelude::*;

struct FailingSorter;

impl TableSorter for FailingSorter {
    fn make_orderable(&mut self, table_id: &TableId, _options: &SorterOptions) -> Result<()> {
        Err(UiError::dom(format!("sorter unavailable for {table_id}")))
    }
}

#[derive(Default)]
struct CountingSorter {
    tables: Vec<String>,
}

impl TableSorter for CountingSorter {
    fn make_orderable(&mut self, table_id: &TableId, _options: &SorterOptions) -> Result<()> {
        self.tables.push(table_id.to_string());
        Ok(())
    }
}

fn submitter_table() -> TableSnapshot {
    let markers = TableMarkers::from_classes(["sortable", "filterable"], &TablesConfig::default());
    TableSnapshot::new("submitters", markers)
        .with_head_row(Row::from_texts(["", "Submitter", "Variants"]))
        .with_body_rows(
            table_fixtures::submitter_rows()
                .into_iter()
                .enumerate()
                .map(|(i, texts)| Row::with_checkbox(i < 3, texts.into_iter().skip(1))),
        )
}

fn score_table() -> TableSnapshot {
    let markers = TableMarkers::from_classes(["sortable"], &TablesConfig::default());
    TableSnapshot::new("scores", markers)
        .with_head_row(Row::from_texts(table_fixtures::score_header()))
        .with_body_rows(table_fixtures::score_rows().into_iter().map(Row::from_texts))
}

#[test]
fn test_page_setup_then_bulk_toggle() {
    init_test_logging();

    let mut tables = vec![submitter_table(), score_table()];
    let mut sorter = CountingSorter::default();
    let setups = initialize(&tables, &TablesConfig::default(), &mut sorter).unwrap();

    assert_eq!(sorter.tables, ["submitters", "scores"]);
    let toggled: Vec<&TableSetup> = setups.iter().filter(|s| s.bulk_toggle).collect();
    assert_eq!(toggled.len(), 1);
    assert_eq!(toggled[0].table_id.as_str(), "submitters");

    // 3 of 5 checked, so the header click unchecks all of them.
    assert_eq!(apply_bulk_toggle(&mut tables[0]), Some(false));
    assert!(tables[0].checkbox_states().iter().all(|checked| !checked));
    assert_eq!(apply_bulk_toggle(&mut tables[1]), None);
}

#[test]
fn test_sorter_failure_propagates() {
    let err = initialize(&[score_table()], &TablesConfig::default(), &mut FailingSorter).unwrap_err();
    assert!(err.to_string().contains("scores"));
}

#[test]
fn test_export_with_header() {
    let download = csv::export(&score_table(), &CsvConfig::default());
    assert_eq!(
        download.body,
        "\"Name\",\"Score\"\n\"Alice\",\"90\"\n\"Bob\",\"80\"\n"
    );
    assert_eq!(download.filename, "scores.csv");
}

#[test]
fn test_export_filterable_table() {
    let download = csv::export(&submitter_table(), &CsvConfig::default());
    let mut lines = download.body.lines();
    assert_eq!(lines.next(), Some("\"Submitter\",\"Variants\""));
    assert_eq!(lines.next(), Some("\"GeneDx\",\"1204\""));
    assert_eq!(download.body.lines().count(), 6);
}

#[test]
fn test_export_quote_modes_from_config() {
    let table = TableSnapshot::new("quotes", TableMarkers::default())
        .with_body_rows([Row::from_texts(["a\"b\"c"])]);

    let config = CsvConfig::default();
    assert_eq!(csv::export(&table, &config).body, "\"a\"\"b\"\"c\"\n");

    let legacy = CsvConfig {
        quote_escaping: QuoteEscaping::FirstOnly,
        ..CsvConfig::default()
    };
    assert_eq!(csv::export(&table, &legacy).body, "\"a\"\"b\"c\"\n");
}

#[test]
fn test_filter_then_clear() {
    let mut table = submitter_table();

    let outcome = filter::apply(&mut table, "GENE");
    assert_eq!(outcome, FilterOutcome { shown: 1, hidden: 4 });

    // "genetics" hits both "Ambry Genetics" and "LabCorp Genetics".
    let outcome = filter::apply(&mut table, "genetics");
    assert_eq!(outcome.shown, 2);

    let outcome = filter::apply(&mut table, "");
    assert_eq!(outcome, FilterOutcome { shown: 5, hidden: 0 });
}

fn body_rows(cells: Vec<Vec<String>>, filterable: bool) -> TableSnapshot {
    let markers = TableMarkers {
        sortable: true,
        filterable,
    };
    TableSnapshot::new("generated", markers).with_body_rows(cells.into_iter().map(|texts| {
        if filterable {
            Row::with_checkbox(false, texts)
        } else {
            Row::from_texts(texts)
        }
    }))
}

proptest! {
    #[test]
    fn prop_empty_query_shows_all_rows(
        cells in prop::collection::vec(prop::collection::vec("[a-zA-Z ]{0,10}", 1..4), 0..20),
        filterable in any::<bool>()
    ) {
        let mut table = body_rows(cells, filterable);
        let rows = table.body.len();

        let outcome = filter::apply(&mut table, "");
        prop_assert_eq!(outcome.shown, rows);
        prop_assert!(table.visibility().iter().all(|visible| *visible));
    }

    #[test]
    fn prop_absent_query_hides_all_rows(
        cells in prop::collection::vec(prop::collection::vec("[a-zA-Z ]{0,10}", 1..4), 0..20),
        filterable in any::<bool>()
    ) {
        let mut table = body_rows(cells, filterable);
        let rows = table.body.len();

        let outcome = filter::apply(&mut table, "#1");
        prop_assert_eq!(outcome.hidden, rows);
        prop_assert!(table.visibility().iter().all(|visible| !*visible));
    }

    #[test]
    fn prop_filter_ignores_case(text in "[a-z]{1,12}", start in 0usize..12, len in 1usize..12) {
        let start = start.min(text.len() - 1);
        let end = (start + len).min(text.len());
        let query = text[start..end].to_uppercase();

        let row = Row::from_texts([text.as_str()]);
        prop_assert!(filter::row_matches(&row, 0, &query));
    }

    #[test]
    fn prop_csv_shape(
        rows in 0usize..10,
        columns in 1usize..6,
        filterable in any::<bool>()
    ) {
        let cells: Vec<Vec<String>> = (0..rows)
            .map(|r| (0..columns).map(|c| format!("r{r}c{c}")).collect())
            .collect();
        let table = body_rows(cells, filterable);

        let body = csv::export(&table, &CsvConfig::default()).body;
        prop_assert_eq!(body.lines().count(), rows);
        for line in body.lines() {
            let fields: Vec<&str> = line.split(',').collect();
            prop_assert_eq!(fields.len(), columns);
            prop_assert!(fields.iter().all(|f| f.starts_with('"') && f.ends_with('"')));
        }
        prop_assert!(rows == 0 || body.ends_with('\n'));
    }

    #[test]
    fn prop_bulk_toggle_is_uniform(states in prop::collection::vec(any::<bool>(), 1..30)) {
        let checked = states.iter().filter(|s| **s).count();
        let rows: Vec<Vec<String>> = states.iter().map(|_| vec!["lab".to_string()]).collect();
        let mut table = body_rows(rows, true);
        for (row, state) in table.body.iter_mut().zip(&states) {
            row.cells[0].checkbox = Some(*state);
        }

        let new_state = apply_bulk_toggle(&mut table);
        prop_assert_eq!(new_state, Some(states.len() - checked >= checked));
        prop_assert!(table.checkbox_states().iter().all(|s| Some(*s) == new_state));
    }
}
