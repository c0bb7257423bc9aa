//! View-model mutations on the data matrix.
//!
//! Each operation records a [`Patch`] and finishes by announcing the row
//! count to the sink.

use tracing::{debug, info};

use super::{DataModel, Patch, RowSink, ViewModel};
use crate::error::{GridError, Result};
use crate::types::{CellValue, Interval, Rectangle, SortDirection};

/// Set `row[col]`, padding the row with absent cells.
fn put(row: &mut Vec<Option<CellValue>>, col: usize, value: Option<CellValue>) {
    if row.len() <= col {
        if value.is_none() {
            return;
        }
        row.resize(col + 1, None);
    }
    if let Some(slot) = row.get_mut(col) {
        *slot = value;
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl ViewModel for DataModel {
    fn on_cell_change(
        &mut self,
        row: usize,
        col: usize,
        value: Option<CellValue>,
        sink: &mut dyn RowSink,
    ) {
        if let Some(cells) = self.ensure_row(row) {
            put(cells, col, value);
        }
        self.patches.push(Patch::CellChange { row, col });
        debug!(row, col, "cell changed");
        self.announce(sink);
    }

    fn on_row_insert(&mut self, row: usize, sink: &mut dyn RowSink) {
        let at = row.saturating_add(1);
        if at > self.rows.len() {
            self.rows.resize_with(at, Vec::new);
        }
        self.rows.insert(at, Vec::new());
        self.patches.push(Patch::RowInsert { row: at });
        debug!(row = at, "row inserted");
        self.announce(sink);
    }

    fn on_row_delete(&mut self, row: usize, sink: &mut dyn RowSink) {
        if row < self.rows.len() {
            self.rows.remove(row);
            self.patches.push(Patch::RowDelete { row });
            debug!(row, "row deleted");
        }
        self.announce(sink);
    }

    fn on_paste(
        &mut self,
        top_row: usize,
        top_col: usize,
        matrix: &[Vec<Option<String>>],
        sink: &mut dyn RowSink,
    ) -> Result<Rectangle> {
        let width = matrix.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::EmptyPaste);
        }

        for (r, source) in matrix.iter().enumerate() {
            let row = top_row + r;
            for (c, text) in source.iter().enumerate() {
                let col = top_col + c;
                let Some(schema) = self.schemas.get(col) else {
                    break;
                };
                let value = text
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| schema.converter.parse(t));
                match value {
                    Some(value) => {
                        if let Some(cells) = self.ensure_row(row) {
                            put(cells, col, Some(value));
                        }
                    }
                    None => {
                        if let Some(cells) = self.rows.get_mut(row) {
                            put(cells, col, None);
                        }
                    }
                }
            }
        }

        let rect = Rectangle::new(
            Interval::new(to_i64(top_row), to_i64(top_row + matrix.len())),
            Interval::new(to_i64(top_col), to_i64(top_col + width)),
        );
        self.patches.push(Patch::Paste { rect });
        debug!(top_row, top_col, rows = matrix.len(), cols = width, "pasted");
        self.announce(sink);
        Ok(rect)
    }

    fn on_sort(&mut self, col: usize, sink: &mut dyn RowSink) -> SortDirection {
        let direction = self.apply_sort(col);
        self.announce(sink);
        direction
    }

    fn on_clear(&mut self, sink: &mut dyn RowSink) {
        self.rows.clear();
        self.patches.push(Patch::Clear);
        info!("data cleared");
        self.announce(sink);
    }
}
