//! Keyboard navigation: cursor and selection moves that keep the target on
//! screen.

use tracing::debug;

use super::Grid;
use crate::model::{DataSource, ViewModel};
use crate::types::{Position, UpwardBoundary};

/// Last row a move can reach; the window below it must still fit in `u32`.
const MAX_ROW: u32 = u32::MAX - 1;

fn saturate(n: i64) -> u32 {
    u32::try_from(n.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX)
}

impl<M: DataSource + ViewModel> Grid<M> {
    /// Move the active cell (or, when `extend`, the selection head) by an
    /// offset.
    ///
    /// A pending edit is committed first. The column is clamped to the
    /// schema; the row may run past the data, growing the logical row count.
    /// When the target row is off screen the window moves just far enough to
    /// show it.
    pub fn navigate(&mut self, d_row: i64, d_col: i64, extend: bool) {
        self.commit_edit();
        let from = if extend {
            self.selection.head()
        } else {
            self.cursor.pos
        };
        let target = self.target_cell(from, d_row, d_col);

        self.hide_highlights();
        if extend {
            self.selection.expand(target);
        } else {
            self.selection.set(target);
        }
        if !self.viewport.contains_row(target.row) {
            let first = self.viewport.first_row_showing(target.row);
            debug!(from = self.viewport.first_row, to = first, "window moved");
            self.move_window(first, false);
        }
        if !extend {
            self.move_cursor(target);
        }
        self.show_highlights();
        debug!(row = target.row, col = target.col, extend, "navigated");
    }

    /// Cell reached from `from` by the offset, before any window change.
    pub fn target_cell(&self, from: Position, d_row: i64, d_col: i64) -> Position {
        let last_col = i64::from(self.viewport.col_count.saturating_sub(1));
        let col = i64::from(from.col).saturating_add(d_col).clamp(0, last_col);

        let row = i64::from(from.row).saturating_add(d_row);
        let row = if row >= 0 {
            row
        } else {
            match self.config.upward_boundary {
                UpwardBoundary::Snap => 0,
                UpwardBoundary::Absorb if d_row == -1 => 0,
                UpwardBoundary::Absorb => i64::from(from.row),
            }
        };
        let row = row.min(i64::from(MAX_ROW));
        Position::new(saturate(row), saturate(col))
    }
}
