//! Scrolling the row window.
//!
//! The host's scroll bar mirrors a [`ScrollIndicator`]: its range is the
//! logical row count and its value the first visible row.

use serde::Serialize;
use tracing::debug;

use super::Grid;
use crate::model::{DataSource, ViewModel};

/// Scroll bar state in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrollIndicator {
    max: u32,
    value: u32,
}

impl ScrollIndicator {
    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.value = self.value.min(max);
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value.min(self.max);
    }
}

impl<M: DataSource + ViewModel> Grid<M> {
    /// Show rows from `first` on.
    ///
    /// Selection and active cell keep their logical positions; their
    /// highlights are repainted where they now fall, or dropped when off
    /// screen. `from_indicator` skips writing the value back to the
    /// indicator that caused the call.
    pub fn set_first_row(&mut self, first: u32, from_indicator: bool) {
        self.hide_highlights();
        self.move_window(first, from_indicator);
        self.show_highlights();
    }

    /// Scroll by `delta` rows, clamped to the scroll range.
    pub fn scroll_by(&mut self, delta: i64) {
        let current = i64::from(self.viewport.first_row);
        let target = current
            .saturating_add(delta)
            .clamp(0, i64::from(self.viewport.max_first_row()));
        if target != current {
            let first = u32::try_from(target).unwrap_or(self.viewport.first_row);
            self.set_first_row(first, false);
        }
    }

    pub(super) fn move_window(&mut self, first: u32, from_indicator: bool) {
        self.viewport.first_row = first;
        self.viewport.grow_to_fit();
        self.indicator.set_max(self.viewport.row_count);
        if !from_indicator {
            self.indicator.set_value(first);
        }
        self.pull_window();
        debug!(first, rows = self.viewport.row_count, "window set");
    }
}
