//! Plain-data copy of a table element.

use cvm_common::TableId;
use cvm_config::TablesConfig;
use serde::{Deserialize, Serialize};

/// One table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Visible text of the cell.
    pub text: String,
    /// State of the checkbox input inside the cell, if there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox: Option<bool>,
}

impl Cell {
    /// A text-only cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checkbox: None,
        }
    }

    /// A cell holding a checkbox and no text.
    pub fn checkbox(checked: bool) -> Self {
        Self {
            text: String::new(),
            checkbox: Some(checked),
        }
    }
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in column order.
    pub cells: Vec<Cell>,
    /// Whether the row is currently hidden.
    #[serde(default)]
    pub hidden: bool,
}

impl Row {
    /// A visible row of text cells.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::text).collect(),
            hidden: false,
        }
    }

    /// A visible row whose first cell is a checkbox, followed by text cells.
    pub fn with_checkbox<I, S>(checked: bool, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Self::from_texts(texts);
        row.cells.insert(0, Cell::checkbox(checked));
        row
    }

    /// Cell at `column`, if the row is that wide.
    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }
}

/// Opt-in markers carried on the table element's class list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMarkers {
    /// Rows can be reordered by column.
    pub sortable: bool,
    /// Column 0 holds per-row checkboxes.
    pub filterable: bool,
}

impl TableMarkers {
    /// Read the markers from a class list.
    pub fn from_classes<'a, I>(classes: I, config: &TablesConfig) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        classes
            .into_iter()
            .fold(Self::default(), |mut markers, class| {
                if class == config.sortable_class {
                    markers.sortable = true;
                }
                if class == config.filterable_class {
                    markers.filterable = true;
                }
                markers
            })
    }

    /// Index of the first column holding data: 1 when column 0 is the
    /// checkbox column, otherwise 0.
    pub fn first_data_column(&self) -> usize {
        usize::from(self.filterable)
    }
}

/// A table's header and body rows together with its markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Element id.
    pub id: TableId,
    /// Class-list markers.
    #[serde(default)]
    pub markers: TableMarkers,
    /// Rows of the header section.
    #[serde(default)]
    pub head: Vec<Row>,
    /// Rows of the body section.
    #[serde(default)]
    pub body: Vec<Row>,
}

impl TableSnapshot {
    /// An empty table.
    pub fn new(id: impl Into<TableId>, markers: TableMarkers) -> Self {
        Self {
            id: id.into(),
            markers,
            head: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Append a header row.
    pub fn with_head_row(mut self, row: Row) -> Self {
        self.head.push(row);
        self
    }

    /// Append body rows.
    pub fn with_body_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.body.extend(rows);
        self
    }

    /// Index of the first column holding data.
    pub fn first_data_column(&self) -> usize {
        self.markers.first_data_column()
    }

    /// Header rows followed by body rows, in document order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.head.iter().chain(self.body.iter())
    }

    /// Checkbox states of the body's first column, skipping rows without one.
    pub fn checkbox_states(&self) -> Vec<bool> {
        self.body
            .iter()
            .filter_map(|row| row.cell(0).and_then(|cell| cell.checkbox))
            .collect()
    }

    /// Visibility of each body row, in order.
    pub fn visibility(&self) -> Vec<bool> {
        self.body.iter().map(|row| !row.hidden).collect()
    }
}
