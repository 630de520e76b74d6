//! # CVM Web
//!
//! Browser bindings for the table and graph utilities, exported under the
//! names the page templates call: `initTables`, `exportCsv`, `filterTable`,
//! `lineGraph` and `configure`.
//!
//! Each export reads the document into plain data, runs the pure logic from
//! `cvm-tables` or `cvm-graphs`, and writes the result back. Failures are
//! logged to the console and rethrown as JavaScript errors.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod console;
pub mod dom;
pub mod download;
pub mod sorter;
pub mod state;

use cvm_common::{init_logging_with_writer, LoggingConfig, Result, UiError};
use cvm_graphs::{finite_y, from_millis, parse_x, LineGraphRenderer, Observation};
use cvm_tables::{apply_bulk_toggle, csv, filter, initialize, TableMarkers};
use dom::JsResultExt;
use js_sys::{Array, Date, Reflect};
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlTableElement};

/// Install console logging once the module is loaded.
#[wasm_bindgen(start)]
pub fn start() {
    let config = state::config();
    let settings = &config.logging;
    let logging = LoggingConfig {
        include_targets: settings.include_targets,
        ..LoggingConfig::browser(&settings.level)
    };
    // A host page may load the module twice; the first subscriber wins.
    let _ = init_logging_with_writer(logging, console::ConsoleMakeWriter);
}

/// Replace the configuration with a YAML or JSON document.
#[wasm_bindgen]
pub fn configure(text: &str) -> std::result::Result<(), JsError> {
    state::configure_from_str(text).map(|_| ()).map_err(report)
}

/// Set up every sortable table under `root`, or under the whole document.
///
/// Returns the number of tables made sortable.
#[wasm_bindgen(js_name = initTables)]
pub fn init_tables(root: Option<Element>) -> std::result::Result<usize, JsError> {
    init_tables_under(root).map_err(report)
}

/// Download a table as `<tableId>.csv`.
#[wasm_bindgen(js_name = exportCsv)]
pub fn export_csv(table_id: &str) -> std::result::Result<(), JsError> {
    export_table(table_id).map_err(report)
}

/// Hide body rows whose first data cell does not contain `query`.
#[wasm_bindgen(js_name = filterTable)]
pub fn filter_table(table_id: &str, query: &str) -> std::result::Result<(), JsError> {
    filter_rows(table_id, query).map_err(report)
}

/// Render the line graph into the graph surface.
///
/// The total series, when one is synthesized, is pushed onto `data`.
#[wasm_bindgen(js_name = lineGraph)]
pub fn line_graph(
    data: &Array,
    y_axis_text: &str,
    y_axis_tick_values: Vec<f64>,
) -> std::result::Result<(), JsError> {
    render_graph(data, y_axis_text, &y_axis_tick_values).map_err(report)
}

fn report(err: UiError) -> JsError {
    error!(error = %err, "Page utility failed");
    JsError::new(&err.to_string())
}

fn init_tables_under(root: Option<Element>) -> Result<usize> {
    let config = state::config();
    let root = match root {
        Some(root) => root,
        None => dom::document()?
            .document_element()
            .ok_or_else(|| UiError::dom("document has no root element"))?,
    };

    let elements = dom::tables_under(&root)?;
    let ids: Vec<String> = elements.iter().map(|table| table.id()).collect();

    let mut sorter = sorter::JQueryTableSorter::new();
    let mut snapshots = Vec::with_capacity(elements.len());
    for (key, table) in dom::table_keys(&ids).into_iter().zip(&elements) {
        snapshots.push(dom::read_table(table, key.clone(), &config.tables)?);
        sorter.register(key, table.clone());
    }

    let setups = initialize(&snapshots, &config.tables, &mut sorter)?;
    for setup in setups.iter().filter(|setup| setup.bulk_toggle) {
        if let Some(table) = snapshots
            .iter()
            .position(|snapshot| snapshot.id == setup.table_id)
            .map(|i| &elements[i])
        {
            attach_bulk_toggle(table)?;
        }
    }

    Ok(setups.len())
}

fn attach_bulk_toggle(table: &HtmlTableElement) -> Result<()> {
    let Some(header) = table
        .query_selector("thead tr:first-child th:first-child")
        .dom_context("querySelector")?
    else {
        warn!(table = %table.id(), "Filterable table has no header cell to toggle from");
        return Ok(());
    };

    let target = table.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        if let Err(err) = toggle_checkboxes(&target) {
            error!(error = %err, "Bulk toggle failed");
        }
    });
    header
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .dom_context("addEventListener")?;
    // The handler lives as long as the page.
    on_click.forget();
    Ok(())
}

fn toggle_checkboxes(table: &HtmlTableElement) -> Result<()> {
    let config = state::config();
    let mut snapshot = dom::read_table(table, dom::table_key(&table.id(), 0), &config.tables)?;
    if apply_bulk_toggle(&mut snapshot).is_some() {
        dom::apply_checkboxes(table, &snapshot)?;
    }
    Ok(())
}

fn export_table(table_id: &str) -> Result<()> {
    let config = state::config();
    let table = dom::find_table(&dom::document()?, table_id)?;
    let snapshot = dom::read_table(&table, table_id.into(), &config.tables)?;

    let export = csv::export(&snapshot, &config.csv);
    download::download(&export)?;
    info!(file = %export.filename, "Started CSV download");
    Ok(())
}

fn filter_rows(table_id: &str, query: &str) -> Result<()> {
    let config = state::config();
    let table = dom::find_table(&dom::document()?, table_id)?;
    let class_name = table.class_name();
    let markers = TableMarkers::from_classes(class_name.split_whitespace(), &config.tables);

    // Only the filtered column is read; the query is typed key by key.
    let column = u32::try_from(markers.first_data_column()).unwrap_or(0);
    let visibility = filter::column_visibility(dom::column_texts(&table, column), query);
    dom::apply_visibility(&table, &visibility)
}

fn render_graph(data: &Array, y_label: &str, y_ticks: &[f64]) -> Result<()> {
    let config = state::config();
    let mut observations = read_observations(data)?;
    let original_len = observations.len();

    let renderer = LineGraphRenderer::new(config.graph.clone())?;
    let svg = renderer.render_to_svg(&mut observations, y_label, y_ticks)?;

    let surface = dom::document()?
        .get_element_by_id(&config.graph.surface_id)
        .ok_or_else(|| UiError::dom(format!("no graph surface '{}'", config.graph.surface_id)))?;
    surface
        .set_attribute("width", &config.graph.width.to_string())
        .dom_context("setAttribute")?;
    surface
        .set_attribute("height", &config.graph.height.to_string())
        .dom_context("setAttribute")?;
    surface.set_inner_html(&svg);

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    for total in &observations[original_len..] {
        let value = serde::Serialize::serialize(total, &serializer)
            .map_err(|e| UiError::dom(format!("total observation: {e}")))?;
        data.push(&value);
    }
    Ok(())
}

fn read_observations(data: &Array) -> Result<Vec<Observation>> {
    data.iter()
        .enumerate()
        .map(|(index, item)| read_observation(index, &item))
        .collect()
}

fn read_observation(index: usize, item: &JsValue) -> Result<Observation> {
    let field = |name: &str| Reflect::get(item, &JsValue::from_str(name)).dom_context("read observation");
    let invalid = |name: &str| UiError::validation_field(format!("observation {index} has no usable {name}"), name);

    let x = field("x")?;
    let x = if let Some(date) = x.dyn_ref::<Date>() {
        from_millis(date.get_time())?
    } else if let Some(millis) = x.as_f64() {
        from_millis(millis)?
    } else if let Some(text) = x.as_string() {
        parse_x(&text)?
    } else {
        return Err(invalid("x"));
    };

    let y = finite_y(field("y")?.as_f64().ok_or_else(|| invalid("y"))?)?;
    let serie = field("serie")?.as_string().ok_or_else(|| invalid("serie"))?;

    Ok(Observation::new(x, y, serie))
}
