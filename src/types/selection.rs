use super::geometry::{Position, Rectangle};

/// Rectangular selection between an anchor cell and the last touched cell.
///
/// The rectangle is always the normalized bounding box of `initial` and
/// `head`, so it is never empty: a fresh selection covers one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    rect: Rectangle,
    initial: Position,
    head: Position,
}

impl Selection {
    /// Create a 1×1 selection at `pos`
    pub fn new(pos: Position) -> Self {
        Self {
            rect: Rectangle::cell(pos),
            initial: pos,
            head: pos,
        }
    }

    /// Collapse to the single cell at `pos`, which becomes anchor and head
    pub fn set(&mut self, pos: Position) {
        *self = Self::new(pos);
    }

    /// Move the head to `pos`, keeping the anchor
    pub fn expand(&mut self, pos: Position) {
        self.head = pos;
        self.rect = Rectangle::spanning(self.initial, self.head);
    }

    /// Select the span between two explicit corners
    pub fn span(initial: Position, head: Position) -> Self {
        Self {
            rect: Rectangle::spanning(initial, head),
            initial,
            head,
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn initial(&self) -> Position {
        self.initial
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn is_single_cell(&self) -> bool {
        self.initial == self.head
    }

    /// Inclusive bounds as a `(min_row, min_col, max_row, max_col)` tuple
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.initial.row.min(self.head.row),
            self.initial.col.min(self.head.col),
            self.initial.row.max(self.head.row),
            self.initial.col.max(self.head.col),
        )
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Position::default())
    }
}
