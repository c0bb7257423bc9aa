//! Data model tests
//!
//! The model driven directly through its two sides: loading from JSON, row
//! windows pushed to a sink, clipboard text and the patch log. Also a grid
//! over a wrapped model, to check what the grid pulls and when.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::Cell;

use chrono::NaiveDate;
use common::*;
use serde_json::json;
use vgrid::model::{DataSource, Patch, RowSink, ViewModel};
use vgrid::types::{
    CellValue, ColumnSchema, ColumnType, Interval, Position, Rectangle, Row, SortDirection,
};
use vgrid::{DataModel, Grid, GridError, Intent, Result};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn json_rows_go_through_column_converters() {
    let data = vec![
        vec![json!(1), json!("a"), json!(true)],
        vec![json!("2.5"), json!(""), json!("FALSE")],
        vec![json!(null), json!(7), json!({"nested": 1})],
    ];
    let m = DataModel::from_json_rows(schemas(), &data);
    assert_eq!(m.row_count(), 3);
    assert_eq!(m.value(0, 0), Some(&CellValue::Number(1.0)));
    assert_eq!(m.value(1, 0), Some(&CellValue::Number(2.5)));
    assert!(m.value(1, 1).is_none());
    assert_eq!(m.value(1, 2), Some(&CellValue::Boolean(false)));
    assert!(m.value(2, 0).is_none());
    assert_eq!(m.value(2, 1), Some(&CellValue::Number(7.0)));
    assert!(m.value(2, 2).is_none());
}

#[test]
fn date_columns_parse_iso_dates() {
    let cols = vec![ColumnSchema::new("when", ColumnType::Date)];
    let m = DataModel::from_json_str(cols, r#"[["2024-02-29"], ["soon"]]"#).unwrap();
    let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert_eq!(m.value(0, 0), Some(&CellValue::Date(leap)));
    assert_eq!(m.value(1, 0), Some(&CellValue::Text("soon".into())));
}

#[test]
fn malformed_json_is_an_error() {
    let err = DataModel::from_json_str(schemas(), r#"{"rows": 1}"#).unwrap_err();
    assert!(matches!(err, GridError::Json(_)));
}

#[test]
fn rows_serialize_back_to_json() {
    let m = DataModel::new(
        schemas(),
        vec![vec![Some(CellValue::Number(3.0)), None, Some(CellValue::Boolean(true))]],
    );
    assert_eq!(m.to_json_rows(), vec![vec![json!(3.0), json!(null), json!(true)]]);
}

// ============================================================================
// Data source side
// ============================================================================

#[test]
fn init_announces_the_row_count() {
    let mut m = DataModel::new(schemas(), rows(12));
    let mut sink = RecordingSink::default();
    m.init(&mut sink);
    assert_eq!(sink.counts, vec![12]);
    assert!(sink.windows.is_empty());
}

#[test]
fn viewport_range_is_clipped_to_the_data() {
    let m = DataModel::new(schemas(), rows(6));
    let mut sink = RecordingSink::default();
    m.set_viewport_range(4, 9, &mut sink);
    m.set_viewport_range(10, 15, &mut sink);
    let held: Vec<usize> = sink.windows[0].keys().copied().collect();
    assert_eq!(held, vec![4, 5]);
    assert_eq!(sink.windows[0][&5][1], Some(CellValue::Text("r5".into())));
    assert!(sink.windows[1].is_empty());
}

#[test]
fn clipboard_text_formats_cells() {
    let cols = vec![
        ColumnSchema::new("price", ColumnType::Number).with_fraction_digits(2),
        ColumnSchema::new("note", ColumnType::String),
    ];
    let m = DataModel::new(
        cols,
        vec![
            vec![Some(CellValue::Number(4.5)), Some(CellValue::Text("say \"hi\"".into()))],
            vec![None],
        ],
    );
    let rect = Rectangle::spanning(Position::new(0, 0), Position::new(1, 1));
    assert_eq!(m.to_clipboard(&rect), "4.50\t\"say \"\"hi\"\"\"\r\n\t");
}

// ============================================================================
// View model side
// ============================================================================

#[test]
fn every_mutation_announces() {
    let mut m = DataModel::new(schemas(), rows(3));
    let mut sink = RecordingSink::default();
    m.on_cell_change(0, 0, None, &mut sink);
    m.on_row_insert(2, &mut sink);
    m.on_row_delete(0, &mut sink);
    m.on_paste(0, 0, &[vec![Some("x".into())]], &mut sink).unwrap();
    m.on_sort(1, &mut sink);
    m.on_clear(&mut sink);
    assert_eq!(sink.counts, vec![3, 4, 3, 3, 3, 0]);
}

#[test]
fn patch_log_records_in_order() {
    let mut m = DataModel::new(schemas(), rows(3));
    let mut sink = RecordingSink::default();
    m.on_cell_change(1, 2, Some(CellValue::Boolean(false)), &mut sink);
    let rect = m
        .on_paste(2, 1, &[vec![Some("p".into()), None]], &mut sink)
        .unwrap();
    m.on_sort(0, &mut sink);
    m.on_sort(0, &mut sink);
    assert_eq!(
        m.take_patches(),
        vec![
            Patch::CellChange { row: 1, col: 2 },
            Patch::Paste { rect },
            Patch::Sort {
                col: 0,
                direction: SortDirection::Ascending
            },
            Patch::Sort {
                col: 0,
                direction: SortDirection::Descending
            },
        ]
    );
    assert_eq!(rect, Rectangle::new(Interval::new(2, 3), Interval::new(1, 3)));
}

#[test]
fn patches_serialize_with_a_kind_tag() {
    let patch = Patch::RowInsert { row: 4 };
    assert_eq!(
        serde_json::to_value(&patch).unwrap(),
        json!({"kind": "rowInsert", "row": 4})
    );
}

#[test]
fn sort_state_follows_requests() {
    let mut m = DataModel::new(schemas(), rows(3));
    let mut sink = RecordingSink::default();
    assert_eq!(m.sort_state().column, None);
    assert_eq!(m.on_sort(2, &mut sink), SortDirection::Ascending);
    assert_eq!(m.on_sort(2, &mut sink), SortDirection::Descending);
    assert_eq!(m.on_sort(2, &mut sink), SortDirection::Ascending);
    assert_eq!(m.sort_state().column, Some(2));
    assert_eq!(m.on_sort(0, &mut sink), SortDirection::Ascending);
    assert_eq!(m.sort_state().column, Some(0));
}

// ============================================================================
// Grid over a wrapped model
// ============================================================================

/// Delegates to a [`DataModel`] and counts window pulls.
struct Counting {
    inner: DataModel,
    pulls: Cell<usize>,
}

impl DataSource for Counting {
    fn init(&mut self, sink: &mut dyn RowSink) {
        self.inner.init(sink);
    }

    fn set_viewport_range(&self, first: usize, last: usize, sink: &mut dyn RowSink) {
        self.pulls.set(self.pulls.get() + 1);
        self.inner.set_viewport_range(first, last, sink);
    }

    fn to_clipboard(&self, rect: &Rectangle) -> String {
        self.inner.to_clipboard(rect)
    }

    fn schemas(&self) -> &[ColumnSchema] {
        self.inner.schemas()
    }

    fn row_count(&self) -> usize {
        self.inner.row_count()
    }

    fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.inner.value(row, col)
    }
}

impl ViewModel for Counting {
    fn on_cell_change(
        &mut self,
        row: usize,
        col: usize,
        value: Option<CellValue>,
        sink: &mut dyn RowSink,
    ) {
        self.inner.on_cell_change(row, col, value, sink);
    }

    fn on_row_insert(&mut self, row: usize, sink: &mut dyn RowSink) {
        self.inner.on_row_insert(row, sink);
    }

    fn on_row_delete(&mut self, row: usize, sink: &mut dyn RowSink) {
        self.inner.on_row_delete(row, sink);
    }

    fn on_paste(
        &mut self,
        top_row: usize,
        top_col: usize,
        matrix: &[Vec<Option<String>>],
        sink: &mut dyn RowSink,
    ) -> Result<Rectangle> {
        self.inner.on_paste(top_row, top_col, matrix, sink)
    }

    fn on_sort(&mut self, col: usize, sink: &mut dyn RowSink) -> SortDirection {
        self.inner.on_sort(col, sink)
    }

    fn on_clear(&mut self, sink: &mut dyn RowSink) {
        self.inner.on_clear(sink);
    }
}

fn counting(n: usize) -> Grid<Counting> {
    let model = Counting {
        inner: DataModel::new(schemas(), rows(n)),
        pulls: Cell::new(0),
    };
    Grid::new(model, config(5))
}

#[test]
fn grid_pulls_only_when_the_window_or_data_changes() {
    let mut g = counting(20);
    assert_eq!(g.model().pulls.get(), 1);

    g.handle(move_by(3, 1));
    g.handle(extend_by(1, 0));
    assert_eq!(g.model().pulls.get(), 1);

    g.handle(move_by(5, 0));
    assert_eq!(g.model().pulls.get(), 2);

    g.handle(Intent::InsertRow);
    assert_eq!(g.model().pulls.get(), 3);
}

#[test]
fn grid_window_matches_the_model() {
    let mut g = counting(20);
    g.handle(Intent::Scroll(6));
    let window: Vec<Row> = g
        .window()
        .indices()
        .filter_map(|i| g.window().row(i).cloned())
        .collect();
    assert_eq!(window, g.model().inner.rows()[6..11].to_vec());
}
