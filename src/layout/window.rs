//! The rows the grid currently holds, as pushed by the data source.

use std::collections::BTreeMap;

use crate::model::RowSink;
use crate::types::{CellValue, Row};

/// Passive receiver of row counts and row data.
///
/// The grid reads the announced count back after each model call to learn
/// that data changed.
#[derive(Debug, Default, Clone)]
pub struct RowWindow {
    announced: Option<usize>,
    rows: BTreeMap<usize, Row>,
}

impl RowWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row count announced since the last call, if any.
    pub fn take_announced(&mut self) -> Option<usize> {
        self.announced.take()
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(&row)
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(&row)?.get(col)?.as_ref()
    }

    /// Logical indices of the rows held.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowSink for RowWindow {
    fn set_row_count(&mut self, count: usize) {
        self.announced = Some(count);
    }

    fn set_row_data(&mut self, rows: BTreeMap<usize, Row>) {
        self.rows = rows;
    }
}
