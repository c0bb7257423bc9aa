//! In-memory data model behind the grid.
//!
//! The model owns the matrix and plays two roles:
//! - [`DataSource`]: pulled by the view for row counts, row windows and
//!   clipboard text;
//! - [`ViewModel`]: mutated by user intent (edit, insert, delete, paste,
//!   sort, clear).
//!
//! The view side is a [`RowSink`] passed into each call. Every mutation ends
//! by announcing the row count again, which the grid treats as "data changed".

mod mutation;
mod sort;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::tsv;
use crate::types::{CellValue, ColumnSchema, Rectangle, Row, SortDirection};

pub use sort::SortState;

/// Receiver of row counts and row windows (the passive view).
pub trait RowSink {
    fn set_row_count(&mut self, count: usize);
    fn set_row_data(&mut self, rows: BTreeMap<usize, Row>);
}

/// Read side of the model, pulled by the view.
pub trait DataSource {
    /// Announce the current row count; called once when a view attaches.
    fn init(&mut self, sink: &mut dyn RowSink);
    /// Push rows `[first, min(last, row_count))` to the sink.
    fn set_viewport_range(&self, first: usize, last: usize, sink: &mut dyn RowSink);
    /// Tab-separated text for the cells of `rect`.
    fn to_clipboard(&self, rect: &Rectangle) -> String;
    fn schemas(&self) -> &[ColumnSchema];
    fn row_count(&self) -> usize;
    fn value(&self, row: usize, col: usize) -> Option<&CellValue>;
}

/// Write side of the model, driven by user intent.
pub trait ViewModel {
    fn on_cell_change(
        &mut self,
        row: usize,
        col: usize,
        value: Option<CellValue>,
        sink: &mut dyn RowSink,
    );
    /// Insert an empty row after `row`.
    fn on_row_insert(&mut self, row: usize, sink: &mut dyn RowSink);
    fn on_row_delete(&mut self, row: usize, sink: &mut dyn RowSink);
    /// Write `matrix` with its top-left corner at `(top_row, top_col)`.
    ///
    /// # Errors
    /// Returns [`crate::error::GridError::EmptyPaste`] if the first row has no columns.
    fn on_paste(
        &mut self,
        top_row: usize,
        top_col: usize,
        matrix: &[Vec<Option<String>>],
        sink: &mut dyn RowSink,
    ) -> Result<Rectangle>;
    /// Sort by `col`, returning the direction applied.
    fn on_sort(&mut self, col: usize, sink: &mut dyn RowSink) -> SortDirection;
    fn on_clear(&mut self, sink: &mut dyn RowSink);
}

/// One recorded mutation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Patch {
    CellChange { row: usize, col: usize },
    RowInsert { row: usize },
    RowDelete { row: usize },
    Paste { rect: Rectangle },
    Sort { col: usize, direction: SortDirection },
    Clear,
}

/// Matrix of cells plus column schemas.
#[derive(Debug, Clone, Default)]
pub struct DataModel {
    schemas: Vec<ColumnSchema>,
    rows: Vec<Row>,
    sort: SortState,
    patches: Vec<Patch>,
}

impl DataModel {
    pub fn new(schemas: Vec<ColumnSchema>, rows: Vec<Row>) -> Self {
        Self {
            schemas,
            rows,
            sort: SortState::default(),
            patches: Vec::new(),
        }
    }

    /// Build a model from JSON rows, reading strings in typed columns
    /// through the column converter.
    pub fn from_json_rows(schemas: Vec<ColumnSchema>, rows: &[Vec<serde_json::Value>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, value)| match (value, schemas.get(col)) {
                        (serde_json::Value::String(s), _) if s.is_empty() => None,
                        (serde_json::Value::String(s), Some(schema)) => {
                            Some(schema.converter.parse(s))
                        }
                        _ => CellValue::from_json(value),
                    })
                    .collect()
            })
            .collect();
        Self::new(schemas, rows)
    }

    /// Parse a JSON array of row arrays.
    ///
    /// # Errors
    /// Returns [`GridError::Json`] if the text is not an array of arrays.
    pub fn from_json_str(schemas: Vec<ColumnSchema>, json: &str) -> Result<Self> {
        let rows: Vec<Vec<serde_json::Value>> = serde_json::from_str(json)?;
        Ok(Self::from_json_rows(schemas, &rows))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Mutations recorded since creation or the last [`take_patches`](Self::take_patches).
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn take_patches(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.patches)
    }

    /// Rows as JSON arrays (`null` for absent cells).
    pub fn to_json_rows(&self) -> Vec<Vec<serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(value) => serde_json::to_value(value).unwrap_or_default(),
                        None => serde_json::Value::Null,
                    })
                    .collect()
            })
            .collect()
    }

    /// Grow the matrix so that `row` exists.
    fn ensure_row(&mut self, row: usize) -> Option<&mut Row> {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        self.rows.get_mut(row)
    }

    fn announce(&self, sink: &mut dyn RowSink) {
        sink.set_row_count(self.rows.len());
    }
}

impl DataSource for DataModel {
    fn init(&mut self, sink: &mut dyn RowSink) {
        self.announce(sink);
    }

    fn set_viewport_range(&self, first: usize, last: usize, sink: &mut dyn RowSink) {
        let last = last.min(self.rows.len());
        let window: BTreeMap<usize, Row> = (first..last)
            .filter_map(|idx| self.rows.get(idx).map(|row| (idx, row.clone())))
            .collect();
        sink.set_row_data(window);
    }

    fn to_clipboard(&self, rect: &Rectangle) -> String {
        tsv::serialize(&self.schemas, rect, &self.rows, tsv::TAB)
    }

    fn schemas(&self) -> &[ColumnSchema] {
        &self.schemas
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)?.as_ref()
    }
}
