//! The jQuery tablesorter plugin behind [`TableSorter`].

use crate::dom::JsResultExt;
use cvm_common::{Result, TableId, UiError};
use cvm_tables::{SorterOptions, TableSorter};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::HtmlTableElement;

#[wasm_bindgen]
extern "C" {
    /// A jQuery selection.
    type JQuery;

    #[wasm_bindgen(catch, js_name = jQuery)]
    fn jquery(element: &HtmlTableElement) -> std::result::Result<JQuery, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn tablesorter(this: &JQuery, options: &JsValue) -> std::result::Result<JsValue, JsValue>;
}

/// Makes tables orderable through `$(table).tablesorter(options)`.
#[derive(Default)]
pub struct JQueryTableSorter {
    tables: HashMap<TableId, HtmlTableElement>,
}

impl JQueryTableSorter {
    /// A sorter with no known tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the element behind `id`.
    pub fn register(&mut self, id: TableId, table: HtmlTableElement) {
        self.tables.insert(id, table);
    }
}

impl TableSorter for JQueryTableSorter {
    fn make_orderable(&mut self, table_id: &TableId, options: &SorterOptions) -> Result<()> {
        let table = self
            .tables
            .get(table_id)
            .ok_or_else(|| UiError::table_not_found(table_id.as_str()))?;

        // Plain objects, so the plugin sees `headers` as `{0: {...}}`.
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let options = options
            .serialize(&serializer)
            .map_err(|e| UiError::dom(format!("sorter options: {e}")))?;

        jquery(table)
            .dom_context("jQuery")?
            .tablesorter(&options)
            .dom_context("tablesorter")?;

        debug!(table = %table_id, "Enabled column sorting");
        Ok(())
    }
}
