//! Column sort with a per-column ascending/descending toggle.

use tracing::info;

use super::{DataModel, Patch};
use crate::types::{compare_cells, ColumnSchema, Row, SortDirection};

/// Last column sorted and the direction it was sorted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Direction for a sort request on `col`: the same column toggles,
    /// any other column starts ascending.
    pub fn next(self, col: usize) -> SortDirection {
        match self.column {
            Some(last) if last == col => self.direction.toggled(),
            _ => SortDirection::Ascending,
        }
    }
}

/// Stable sort of `rows` by the raw value in `col`.
///
/// Ascending puts absent cells last; descending is the exact reverse order.
pub fn sort_rows(rows: &mut [Row], col: usize, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let a = a.get(col).and_then(Option::as_ref);
        let b = b.get(col).and_then(Option::as_ref);
        match direction {
            SortDirection::Ascending => compare_cells(a, b),
            SortDirection::Descending => compare_cells(b, a),
        }
    });
}

fn mark_schemas(schemas: &mut [ColumnSchema], col: usize, direction: SortDirection) {
    for (idx, schema) in schemas.iter_mut().enumerate() {
        schema.sort = (idx == col).then_some(direction);
    }
}

impl DataModel {
    pub(super) fn apply_sort(&mut self, col: usize) -> SortDirection {
        let direction = self.sort.next(col);
        sort_rows(&mut self.rows, col, direction);
        mark_schemas(&mut self.schemas, col, direction);
        self.sort = SortState {
            column: Some(col),
            direction,
        };
        self.patches.push(Patch::Sort { col, direction });
        info!(col, ?direction, rows = self.rows.len(), "sorted");
        direction
    }
}
