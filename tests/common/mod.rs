//! Common grid builders and assertion helpers for integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

use std::collections::BTreeMap;

use vgrid::model::RowSink;
use vgrid::render::RenderCommand;
use vgrid::types::{
    CellValue, ColumnSchema, ColumnType, GridConfig, Position, Row, UpwardBoundary,
};
use vgrid::{DataModel, Grid, GridEvent, Intent};

// ============================================================================
// Builders
// ============================================================================

/// Three columns: number, text, boolean.
pub fn schemas() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new("id", ColumnType::Number),
        ColumnSchema::new("name", ColumnType::String),
        ColumnSchema::new("flag", ColumnType::Boolean),
    ]
}

/// `n` rows of `[i, "r{i}", i even]`.
pub fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            vec![
                Some(CellValue::Number(i as f64)),
                Some(CellValue::Text(format!("r{i}"))),
                Some(CellValue::Boolean(i % 2 == 0)),
            ]
        })
        .collect()
}

/// Config with `slots` visible rows.
pub fn config(slots: u32) -> GridConfig {
    GridConfig {
        row_height: 20.0,
        viewport_height: 20.0 * slots as f32,
        ..GridConfig::default()
    }
}

pub fn grid(n: usize, slots: u32) -> Grid {
    Grid::new(DataModel::new(schemas(), rows(n)), config(slots))
}

pub fn grid_with_boundary(n: usize, slots: u32, boundary: UpwardBoundary) -> Grid {
    let config = GridConfig {
        upward_boundary: boundary,
        ..config(slots)
    };
    Grid::new(DataModel::new(schemas(), rows(n)), config)
}

// ============================================================================
// Intents
// ============================================================================

pub fn move_by(rows: i64, cols: i64) -> Intent {
    Intent::MoveBy {
        rows,
        cols,
        extend: false,
    }
}

pub fn extend_by(rows: i64, cols: i64) -> Intent {
    Intent::MoveBy {
        rows,
        cols,
        extend: true,
    }
}

pub fn click(row: u32, col: u32) -> Intent {
    Intent::PointerDown {
        row,
        col,
        extend: false,
    }
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_active(grid: &Grid, row: u32, col: u32) {
    assert_eq!(grid.active_cell().pos, Position::new(row, col), "active cell");
}

/// The active row lies inside the visible window.
pub fn assert_active_visible(grid: &Grid) {
    let row = grid.active_cell().pos.row;
    let vp = grid.viewport();
    assert!(
        vp.contains_row(row),
        "active row {row} outside [{}, {})",
        vp.first_row,
        vp.end_row()
    );
}

pub fn copied_text(grid: &mut Grid) -> String {
    grid.handle(Intent::Copy);
    grid.drain_events()
        .into_iter()
        .find_map(|e| match e {
            GridEvent::CopyRequested { text } => Some(text),
            _ => None,
        })
        .expect("copy should request a clipboard write")
}

pub fn notices(events: &[GridEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            GridEvent::Notice { message } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Commands that paint rather than clear.
pub fn painted(commands: &[RenderCommand]) -> Vec<RenderCommand> {
    commands
        .iter()
        .filter(|c| !c.is_clear())
        .cloned()
        .collect()
}

/// Sink recording every call, for driving the model directly.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub counts: Vec<usize>,
    pub windows: Vec<BTreeMap<usize, Row>>,
}

impl RowSink for RecordingSink {
    fn set_row_count(&mut self, count: usize) {
        self.counts.push(count);
    }

    fn set_row_data(&mut self, rows: BTreeMap<usize, Row>) {
        self.windows.push(rows);
    }
}
