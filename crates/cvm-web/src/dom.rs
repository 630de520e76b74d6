//! Reading tables out of the document and writing row state back.

use cvm_common::{Result, TableId, UiError};
use cvm_config::TablesConfig;
use cvm_tables::{Cell, Row, TableMarkers, TableSnapshot};
use std::collections::HashSet;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlCollection, HtmlElement, HtmlInputElement, HtmlTableElement,
    HtmlTableRowElement,
};

/// Map a failed browser call onto a DOM error.
pub(crate) trait JsResultExt<T> {
    fn dom_context(self, action: &str) -> Result<T>;
}

impl<T> JsResultExt<T> for std::result::Result<T, JsValue> {
    fn dom_context(self, action: &str) -> Result<T> {
        self.map_err(|e| UiError::dom(format!("{action} failed: {e:?}")))
    }
}

/// The page's document.
pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| UiError::dom("no document available"))
}

/// The table element with the given id.
pub fn find_table(document: &Document, id: &str) -> Result<HtmlTableElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlTableElement>().ok())
        .ok_or_else(|| UiError::table_not_found(id))
}

/// Every table under `root`, in document order.
pub fn tables_under(root: &Element) -> Result<Vec<HtmlTableElement>> {
    let nodes = root.query_selector_all("table").dom_context("querySelectorAll")?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlTableElement>().ok())
        .collect())
}

/// Identifier for a table: its id attribute, or its position on the page.
pub fn table_key(id_attribute: &str, index: usize) -> TableId {
    if id_attribute.is_empty() {
        TableId::new(format!("table-{index}"))
    } else {
        TableId::new(id_attribute)
    }
}

/// One distinct identifier per table, in page order.
///
/// Tables without an id, or repeating an id already taken, are keyed by
/// position instead.
pub fn table_keys<S: AsRef<str>>(id_attributes: &[S]) -> Vec<TableId> {
    let mut taken: HashSet<String> = HashSet::new();
    id_attributes
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let id = id.as_ref();
            let mut key = if id.is_empty() || taken.contains(id) {
                format!("table-{index}")
            } else {
                id.to_string()
            };
            let mut suffix = 1;
            while taken.contains(&key) {
                key = format!("table-{index}-{suffix}");
                suffix += 1;
            }
            taken.insert(key.clone());
            TableId::new(key)
        })
        .collect()
}

/// Whether an inline `display` value hides the element.
pub fn is_hidden(display: &str) -> bool {
    display.trim().eq_ignore_ascii_case("none")
}

/// Copy a table element into a snapshot.
pub fn read_table(table: &HtmlTableElement, id: TableId, config: &TablesConfig) -> Result<TableSnapshot> {
    let class_name = table.class_name();
    let markers = TableMarkers::from_classes(class_name.split_whitespace(), config);

    let head = match table.t_head() {
        Some(section) => read_rows(&section.rows())?,
        None => Vec::new(),
    };

    let mut body = Vec::new();
    for section in collection_items(&table.t_bodies()) {
        if let Some(section) = section.dyn_ref::<web_sys::HtmlTableSectionElement>() {
            body.extend(read_rows(&section.rows())?);
        }
    }

    Ok(TableSnapshot {
        id,
        markers,
        head,
        body,
    })
}

/// Body rows of a table, across every body section.
pub fn body_rows(table: &HtmlTableElement) -> Vec<HtmlTableRowElement> {
    collection_items(&table.t_bodies())
        .into_iter()
        .filter_map(|section| section.dyn_into::<web_sys::HtmlTableSectionElement>().ok())
        .flat_map(|section| collection_items(&section.rows()))
        .filter_map(|row| row.dyn_into::<HtmlTableRowElement>().ok())
        .collect()
}

/// Rendered text of one column of the body rows; `None` where a row is
/// shorter than `column`.
pub fn column_texts(table: &HtmlTableElement, column: u32) -> Vec<Option<String>> {
    body_rows(table)
        .iter()
        .map(|row| row.cells().item(column).map(|cell| visible_text(&cell)))
        .collect()
}

/// Show or hide body rows to match `visibility`.
pub fn apply_visibility(table: &HtmlTableElement, visibility: &[bool]) -> Result<()> {
    for (row, visible) in body_rows(table).iter().zip(visibility) {
        let style = row.style();
        if *visible {
            style.remove_property("display").dom_context("show row")?;
        } else {
            style.set_property("display", "none").dom_context("hide row")?;
        }
    }
    Ok(())
}

/// Copy the snapshot's first-column checkbox states back onto the inputs.
pub fn apply_checkboxes(table: &HtmlTableElement, snapshot: &TableSnapshot) -> Result<()> {
    for (row, state) in body_rows(table).iter().zip(&snapshot.body) {
        let checked = state.cell(0).and_then(|cell| cell.checkbox);
        if let (Some(checked), Some(input)) = (checked, first_cell_input(row)?) {
            input.set_checked(checked);
        }
    }
    Ok(())
}

fn read_rows(rows: &HtmlCollection) -> Result<Vec<Row>> {
    collection_items(rows)
        .into_iter()
        .filter_map(|row| row.dyn_into::<HtmlTableRowElement>().ok())
        .map(|row| read_row(&row))
        .collect()
}

fn read_row(row: &HtmlTableRowElement) -> Result<Row> {
    let cells = collection_items(&row.cells())
        .iter()
        .map(read_cell)
        .collect::<Result<Vec<_>>>()?;
    let display = row.style().get_property_value("display").dom_context("read row style")?;

    Ok(Row {
        cells,
        hidden: is_hidden(&display),
    })
}

fn read_cell(cell: &Element) -> Result<Cell> {
    let checkbox = cell
        .query_selector("input")
        .dom_context("querySelector")?
        .and_then(|input| input.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked());

    Ok(Cell {
        text: visible_text(cell),
        checkbox,
    })
}

/// Text as rendered, so markup whitespace and hidden content stay out.
fn visible_text(cell: &Element) -> String {
    match cell.dyn_ref::<HtmlElement>() {
        Some(element) => element.inner_text(),
        None => cell.text_content().unwrap_or_default(),
    }
}

fn first_cell_input(row: &HtmlTableRowElement) -> Result<Option<HtmlInputElement>> {
    let Some(cell) = row.cells().item(0) else {
        return Ok(None);
    };
    Ok(cell
        .query_selector("input")
        .dom_context("querySelector")?
        .and_then(|input| input.dyn_into::<HtmlInputElement>().ok()))
}

fn collection_items(collection: &HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}
