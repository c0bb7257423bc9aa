//! Half-open interval and rectangle arithmetic.
//!
//! Every region the grid talks about (selection, visible window, paste
//! target, repaint area) is a [`Rectangle`] of two right-open [`Interval`]s.
//! Both are plain values: operations return new values and never mutate.

use serde::Serialize;

/// Logical cell coordinate (0-based, not viewport-relative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Right-open integer interval `[min, sup)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    pub min: i64,
    pub sup: i64,
}

impl Interval {
    pub const fn new(min: i64, sup: i64) -> Self {
        Self { min, sup }
    }

    /// The one-element interval `[at, at + 1)`.
    pub fn unit(at: u32) -> Self {
        let at = i64::from(at);
        Self::new(at, at + 1)
    }

    /// Number of integers covered; zero for inverted bounds.
    pub fn len(&self) -> u64 {
        u64::try_from(self.sup - self.min).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.sup <= self.min
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value < self.sup
    }

    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        intersect_interval(self, other)
    }

    pub fn shift(&self, offset: i64) -> Interval {
        Interval::new(self.min + offset, self.sup + offset)
    }

    /// The covered integers, clipped at zero, as `usize` indices.
    pub fn indices(&self) -> std::ops::Range<usize> {
        let min = usize::try_from(self.min.max(0)).unwrap_or(usize::MAX);
        let sup = usize::try_from(self.sup.max(0)).unwrap_or(usize::MAX);
        min..sup.max(min)
    }
}

/// Intersection of two intervals; `None` when they share no positive width.
pub fn intersect_interval(a: &Interval, b: &Interval) -> Option<Interval> {
    let min = a.min.max(b.min);
    let sup = a.sup.min(b.sup);
    if sup <= min {
        None
    } else {
        Some(Interval::new(min, sup))
    }
}

fn saturate(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

/// Axis-aligned block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rectangle {
    pub row: Interval,
    pub col: Interval,
}

impl Rectangle {
    pub const fn new(row: Interval, col: Interval) -> Self {
        Self { row, col }
    }

    /// The 1×1 rectangle covering a single cell.
    pub fn cell(pos: Position) -> Self {
        Self::new(Interval::unit(pos.row), Interval::unit(pos.col))
    }

    /// Normalized bounding box of two cells (inclusive of both).
    pub fn spanning(a: Position, b: Position) -> Self {
        Self::new(
            Interval::new(
                i64::from(a.row.min(b.row)),
                i64::from(a.row.max(b.row)) + 1,
            ),
            Interval::new(
                i64::from(a.col.min(b.col)),
                i64::from(a.col.max(b.col)) + 1,
            ),
        )
    }

    pub fn intersect(&self, other: &Rectangle) -> Option<Rectangle> {
        let row = self.row.intersect(&other.row)?;
        let col = self.col.intersect(&other.col)?;
        Some(Rectangle::new(row, col))
    }

    pub fn shift(&self, row_offset: i64, col_offset: i64) -> Rectangle {
        Rectangle::new(self.row.shift(row_offset), self.col.shift(col_offset))
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.row.contains(i64::from(pos.row)) && self.col.contains(i64::from(pos.col))
    }

    pub fn height(&self) -> u64 {
        self.row.len()
    }

    pub fn width(&self) -> u64 {
        self.col.len()
    }

    /// Top-left cell, saturating negative bounds to zero.
    pub fn top_left(&self) -> Position {
        Position::new(saturate(self.row.min), saturate(self.col.min))
    }

    /// Bottom-right cell (inclusive), saturating negative bounds to zero.
    pub fn bottom_right(&self) -> Position {
        Position::new(saturate(self.row.sup - 1), saturate(self.col.sup - 1))
    }
}
