//! Case-insensitive row filtering on a table's first data column.

use crate::model::{Row, TableSnapshot};
use tracing::debug;

/// Row counts after a filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Body rows left visible.
    pub shown: usize,
    /// Body rows hidden.
    pub hidden: usize,
}

/// Whether `text` contains `query`, ignoring case.
pub fn text_matches(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(&query.to_lowercase())
}

/// Whether the cell at `column` contains `query`, ignoring case.
///
/// A row without that cell is treated as holding empty text.
pub fn row_matches(row: &Row, column: usize, query: &str) -> bool {
    text_matches(row.cell(column).map_or("", |cell| cell.text.as_str()), query)
}

/// Visibility for each entry of a single column, `None` standing for a row
/// that has no cell there.
pub fn column_visibility<I, S>(texts: I, query: &str) -> Vec<bool>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let query = query.to_lowercase();
    texts
        .into_iter()
        .map(|text| {
            text.map_or(query.is_empty(), |text| {
                text.as_ref().to_lowercase().contains(&query)
            })
        })
        .collect()
}

/// Visibility each body row should take for `query`.
pub fn row_visibility(table: &TableSnapshot, query: &str) -> Vec<bool> {
    let column = table.first_data_column();
    column_visibility(
        table
            .body
            .iter()
            .map(|row| row.cell(column).map(|cell| cell.text.as_str())),
        query,
    )
}

/// Filter the body rows in place.
pub fn apply(table: &mut TableSnapshot, query: &str) -> FilterOutcome {
    let visibility = row_visibility(table, query);
    let mut outcome = FilterOutcome::default();

    for (row, visible) in table.body.iter_mut().zip(visibility) {
        row.hidden = !visible;
        if visible {
            outcome.shown += 1;
        } else {
            outcome.hidden += 1;
        }
    }

    debug!(
        table = %table.id,
        query,
        shown = outcome.shown,
        hidden = outcome.hidden,
        "Filtered table rows"
    );
    outcome
}
