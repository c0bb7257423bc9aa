//! Keyboard and pointer navigation tests
//!
//! Cursor moves, selection extension, column clamping, both upward boundary
//! policies and the window following the cursor.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_wrap
)]

mod common;

use common::*;
use test_case::test_case;
use vgrid::editor::CursorMode;
use vgrid::types::{Interval, Position, UpwardBoundary};
use vgrid::viewer::events::FAR;
use vgrid::viewer::intent_for_key;
use vgrid::Intent;

// ============================================================================
// Cursor movement
// ============================================================================

#[test]
fn moving_inside_the_window_keeps_first_row() {
    let mut g = grid(20, 5);
    for _ in 0..4 {
        g.handle(move_by(1, 0));
    }
    assert_active(&g, 4, 0);
    assert_eq!(g.viewport().first_row, 0);
}

#[test]
fn stepping_past_the_last_slot_scrolls_by_one() {
    let mut g = grid(20, 5);
    g.handle(move_by(4, 0));
    g.handle(move_by(1, 0));
    assert_active(&g, 5, 0);
    assert_eq!(g.viewport().first_row, 1);
    assert_eq!(g.indicator().value(), 1);
    assert!(g.window().row(5).is_some());
    assert!(g.window().row(0).is_none());
}

#[test]
fn moving_above_the_window_makes_target_the_first_row() {
    let mut g = grid(40, 5);
    g.handle(move_by(30, 0));
    assert_eq!(g.viewport().first_row, 26);
    g.handle(move_by(-10, 0));
    assert_active(&g, 20, 0);
    assert_eq!(g.viewport().first_row, 20);
}

#[test_case(10, 2 ; "right edge")]
#[test_case(-10, 0 ; "left edge")]
#[test_case(1, 1 ; "inside")]
fn columns_are_clamped(cols: i64, expected: u32) {
    let mut g = grid(3, 5);
    g.handle(move_by(0, cols));
    assert_active(&g, 0, expected);
}

#[test]
fn moving_below_the_data_grows_the_row_count() {
    let mut g = grid(20, 5);
    g.handle(move_by(19, 0));
    assert_eq!(g.viewport().first_row, 15);
    g.handle(move_by(3, 0));
    assert_active(&g, 22, 0);
    assert_eq!(g.viewport().first_row, 18);
    assert_eq!(g.viewport().row_count, 23);
    assert_eq!(g.indicator().max(), 23);

    let text = g.visible_text();
    assert_eq!(text[1][0], "19");
    assert_eq!(text[4], vec![String::new(), String::new(), String::new()]);
}

#[test]
fn page_moves_by_the_visible_row_count() {
    let mut g = grid(20, 5);
    g.handle(Intent::PageBy(1));
    assert_active(&g, 5, 0);
    assert_eq!(g.viewport().first_row, 1);
    g.handle(Intent::PageBy(1));
    assert_active(&g, 10, 0);
    g.handle(Intent::PageBy(-1));
    assert_active(&g, 5, 0);
    assert_eq!(g.viewport().first_row, 5);
}

#[test_case(FAR ; "far offset")]
#[test_case(i64::MAX ; "largest offset")]
fn huge_downward_move_keeps_the_cursor_visible(rows: i64) {
    let mut g = grid(5, 4);
    g.handle(move_by(rows, 0));
    assert_active(&g, u32::MAX - 1, 0);
    assert_active_visible(&g);
    assert_eq!(g.viewport().first_row, u32::MAX - 4);
    assert_eq!(g.visible_text().len(), 4);

    g.handle(move_by(-FAR, 0));
    assert_active(&g, 0, 0);
    assert_eq!(g.viewport().first_row, 0);
}

#[test]
fn huge_page_and_extend_do_not_overflow() {
    let mut g = grid(5, 4);
    g.handle(Intent::PageBy(i64::MAX));
    assert_active_visible(&g);
    g.handle(extend_by(FAR, 0));
    assert_eq!(g.selection().head().row, u32::MAX - 1);
    assert!(g.viewport().contains_row(u32::MAX - 1));
}

// ============================================================================
// Upward boundary
// ============================================================================

#[test_case(UpwardBoundary::Snap, 3, -1, 2 ; "snap single step")]
#[test_case(UpwardBoundary::Snap, 3, -5, 0 ; "snap page lands on top")]
#[test_case(UpwardBoundary::Snap, 0, -1, 0 ; "snap at top")]
#[test_case(UpwardBoundary::Absorb, 0, -1, 0 ; "absorb single step at top")]
#[test_case(UpwardBoundary::Absorb, 3, -5, 3 ; "absorb ignores jump past top")]
#[test_case(UpwardBoundary::Absorb, 3, -3, 0 ; "absorb exact jump to top")]
fn upward_boundary(policy: UpwardBoundary, start: i64, d_row: i64, expected: u32) {
    let mut g = grid_with_boundary(20, 5, policy);
    g.handle(move_by(start, 0));
    g.handle(move_by(d_row, 0));
    assert_active(&g, expected, 0);
    assert_active_visible(&g);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn extending_moves_the_head_and_keeps_the_cursor() {
    let mut g = grid(20, 5);
    g.handle(move_by(2, 1));
    g.handle(extend_by(2, 1));
    g.handle(extend_by(0, 5));
    assert_active(&g, 2, 1);
    let sel = g.selection();
    assert_eq!(sel.initial(), Position::new(2, 1));
    assert_eq!(sel.head(), Position::new(4, 2));
    assert_eq!(sel.rect().row, Interval::new(2, 5));
    assert_eq!(sel.rect().col, Interval::new(1, 3));
}

#[test]
fn extending_upward_normalizes_the_rectangle() {
    let mut g = grid(20, 5);
    g.handle(move_by(4, 2));
    g.handle(extend_by(-3, -2));
    assert_eq!(g.selection().rect().row, Interval::new(1, 5));
    assert_eq!(g.selection().rect().col, Interval::new(0, 3));
}

#[test]
fn extending_off_screen_follows_the_head() {
    let mut g = grid(20, 5);
    g.handle(extend_by(7, 0));
    assert_eq!(g.viewport().first_row, 3);
    assert_active(&g, 0, 0);
    assert!(g.viewport().contains_row(g.selection().head().row));
}

#[test]
fn plain_move_collapses_the_selection() {
    let mut g = grid(20, 5);
    g.handle(extend_by(2, 2));
    g.handle(move_by(1, 0));
    assert!(g.selection().is_single_cell());
    assert_active(&g, 1, 0);
}

#[test]
fn select_all_covers_the_data() {
    let mut g = grid(12, 5);
    g.handle(Intent::SelectAll);
    assert_eq!(g.selection().rect().row, Interval::new(0, 12));
    assert_eq!(g.selection().rect().col, Interval::new(0, 3));
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn drag_extends_until_release() {
    let mut g = grid(20, 5);
    g.handle(click(1, 0));
    assert!(g.is_dragging());
    g.handle(Intent::PointerDrag { row: 3, col: 2 });
    g.handle(Intent::PointerUp);
    g.handle(Intent::PointerDrag { row: 4, col: 2 });
    assert_active(&g, 1, 0);
    assert_eq!(g.selection().rect().row, Interval::new(1, 4));
    assert_eq!(g.selection().rect().col, Interval::new(0, 3));
}

#[test]
fn shift_click_extends_from_the_anchor() {
    let mut g = grid(20, 5);
    g.handle(click(2, 2));
    g.handle(Intent::PointerDown {
        row: 0,
        col: 9,
        extend: true,
    });
    assert_active(&g, 2, 2);
    assert_eq!(g.selection().head(), Position::new(0, 2));
}

// ============================================================================
// Properties
// ============================================================================

/// Deterministic pseudo-random offsets.
fn offsets(seed: u64, n: usize) -> Vec<(i64, i64)> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let r = (state >> 33) as i64;
            (r % 15 - 7, (r / 15) % 5 - 2)
        })
        .collect()
}

#[test_case(UpwardBoundary::Snap ; "snap")]
#[test_case(UpwardBoundary::Absorb ; "absorb")]
fn active_row_stays_visible(policy: UpwardBoundary) {
    let mut g = grid_with_boundary(30, 6, policy);
    for (d_row, d_col) in offsets(7, 400) {
        g.handle(move_by(d_row, d_col));
        assert_active_visible(&g);
        assert!(g.active_cell().pos.col < 3);
        let rect = g.selection().rect();
        assert!(rect.contains(g.selection().initial()));
        assert!(rect.contains(g.selection().head()));
    }
}

// ============================================================================
// Key mapping end to end
// ============================================================================

#[test]
fn keys_drive_the_grid() {
    let mut g = grid(20, 5);
    for key in ["ArrowDown", "ArrowDown", "ArrowRight", "Tab"] {
        let intent = intent_for_key(key, false, false, g.active_cell().mode).unwrap();
        g.handle(intent);
    }
    assert_active(&g, 2, 2);
    let intent = intent_for_key("Home", false, false, CursorMode::Active).unwrap();
    g.handle(intent);
    assert_active(&g, 2, 0);
    let intent = intent_for_key("ArrowDown", false, true, CursorMode::Active).unwrap();
    g.handle(intent);
    assert_eq!(g.selection().rect().row, Interval::new(2, 4));
}
