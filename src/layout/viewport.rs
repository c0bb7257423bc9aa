//! Visible row window over the logical grid.

use crate::types::{Interval, Rectangle};

/// The materialized slice of rows.
///
/// `capacity` rows starting at `first_row` are on screen. `row_count` is the
/// logical total the scroll range is sized for; it never drops below
/// `first_row + capacity`, so rows past the data render blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First logical row on screen
    pub first_row: u32,
    /// Number of row slots (container height ÷ row height)
    pub capacity: u32,
    /// Logical row total
    pub row_count: u32,
    /// Number of columns
    pub col_count: u32,
}

impl Viewport {
    pub fn new(capacity: u32, row_count: u32, col_count: u32) -> Self {
        let capacity = capacity.max(1);
        Self {
            first_row: 0,
            capacity,
            row_count: row_count.max(capacity),
            col_count,
        }
    }

    /// One past the last logical row on screen.
    pub fn end_row(&self) -> u32 {
        self.first_row.saturating_add(self.capacity)
    }

    pub fn contains_row(&self, row: u32) -> bool {
        self.first_row <= row && row < self.end_row()
    }

    /// Slot rectangle `{row: [0, capacity), col: [0, col_count)}`.
    pub fn window(&self) -> Rectangle {
        Rectangle::new(
            Interval::new(0, i64::from(self.capacity)),
            Interval::new(0, i64::from(self.col_count)),
        )
    }

    /// Part of a logical rectangle that is on screen, in slot coordinates.
    pub fn to_viewport(&self, rect: &Rectangle) -> Option<Rectangle> {
        rect.shift(-i64::from(self.first_row), 0)
            .intersect(&self.window())
    }

    /// First row that brings `row` on screen with the least movement: the
    /// row becomes the top slot when above the window and the bottom slot
    /// when below it.
    pub fn first_row_showing(&self, row: u32) -> u32 {
        if row < self.first_row {
            row
        } else if row >= self.end_row() {
            row.saturating_add(1).saturating_sub(self.capacity)
        } else {
            self.first_row
        }
    }

    /// Size the logical total for `data_rows` rows of data.
    pub fn set_data_rows(&mut self, data_rows: u32) {
        self.row_count = data_rows.max(self.end_row());
    }

    /// Grow the logical total so the current window fits.
    pub fn grow_to_fit(&mut self) {
        self.row_count = self.row_count.max(self.end_row());
    }

    /// Change the number of row slots, keeping `first_row`.
    pub fn resize(&mut self, capacity: u32) {
        self.capacity = capacity.max(1);
        self.grow_to_fit();
    }

    /// Largest `first_row` within the scroll range.
    pub fn max_first_row(&self) -> u32 {
        self.row_count.saturating_sub(self.capacity)
    }
}
