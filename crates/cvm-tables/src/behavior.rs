//! Sorter setup for sortable tables and the checkbox bulk toggle of
//! filterable ones.

use crate::model::TableSnapshot;
use cvm_common::{Result, TableId};
use cvm_config::TablesConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Per-column sorter options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderOptions {
    /// Whether the column takes part in sorting.
    pub sorter: bool,
}

/// Options handed to the sorting library, in its own key names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SorterOptions {
    /// Class applied to a header sorted ascending.
    pub css_asc: String,
    /// Class applied to a header sorted descending.
    pub css_desc: String,
    /// Column overrides keyed by column index.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<usize, HeaderOptions>,
}

/// The capability that makes a table orderable by column.
///
/// The browser adapter implements this over the page's sorting library.
pub trait TableSorter {
    /// Enable column sorting on the table with the given options.
    fn make_orderable(&mut self, table_id: &TableId, options: &SorterOptions) -> Result<()>;
}

/// What [`initialize`] did to one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSetup {
    /// The table that was set up.
    pub table_id: TableId,
    /// Options passed to the sorter.
    pub options: SorterOptions,
    /// Whether the first header cell must toggle the checkbox column instead
    /// of sorting.
    pub bulk_toggle: bool,
}

/// Sorter options for one table.
pub fn sorter_options(table: &TableSnapshot, config: &TablesConfig) -> SorterOptions {
    let mut headers = BTreeMap::new();
    if table.markers.filterable {
        headers.insert(0, HeaderOptions { sorter: false });
    }

    SorterOptions {
        css_asc: config.css_asc.clone(),
        css_desc: config.css_desc.clone(),
        headers,
    }
}

/// The uniform state every checkbox takes after a bulk toggle.
///
/// Checks all boxes unless strictly more than half are already checked; a
/// tie checks all.
pub fn bulk_toggle_state(states: &[bool]) -> bool {
    let checked = states.iter().filter(|&&state| state).count();
    let unchecked = states.len() - checked;
    unchecked >= checked
}

/// Bulk-toggle the body's first-column checkboxes.
///
/// Returns the new state, or `None` when the table is not filterable or has
/// no checkboxes to toggle.
pub fn apply_bulk_toggle(table: &mut TableSnapshot) -> Option<bool> {
    if !table.markers.filterable {
        return None;
    }

    let states = table.checkbox_states();
    if states.is_empty() {
        return None;
    }

    let state = bulk_toggle_state(&states);
    for cell in table.body.iter_mut().filter_map(|row| row.cells.first_mut()) {
        if let Some(checked) = cell.checkbox.as_mut() {
            *checked = state;
        }
    }

    debug!(table = %table.id, boxes = states.len(), checked = state, "Bulk toggled checkboxes");
    Some(state)
}

/// Set up every sortable table under one root container.
///
/// Tables without the sortable marker are skipped; an empty page is a no-op.
pub fn initialize<S>(
    tables: &[TableSnapshot],
    config: &TablesConfig,
    sorter: &mut S,
) -> Result<Vec<TableSetup>>
where
    S: TableSorter + ?Sized,
{
    let mut setups = Vec::new();

    for table in tables.iter().filter(|table| table.markers.sortable) {
        let options = sorter_options(table, config);
        sorter.make_orderable(&table.id, &options)?;

        setups.push(TableSetup {
            table_id: table.id.clone(),
            options,
            bulk_toggle: table.markers.filterable,
        });
    }

    info!(
        tables = tables.len(),
        sortable = setups.len(),
        "Initialized table behaviors"
    );
    Ok(setups)
}
