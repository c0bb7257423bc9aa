//! Input intents, grid events and the keyboard mapping.
//!
//! Hosts translate DOM events into [`Intent`]s (keys through
//! [`intent_for_key`]) and feed them to [`Grid::handle`](super::Grid::handle).
//! The grid answers with [`GridEvent`]s drained by the host.

use serde::Serialize;

use crate::editor::{ActiveCell, CursorMode};

/// Column offset large enough to reach either edge from any column.
pub const FAR: i64 = u32::MAX as i64;

/// Something the user asked the grid to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Move the cursor, or the selection head when `extend`.
    MoveBy { rows: i64, cols: i64, extend: bool },
    /// Move by whole pages (signed).
    PageBy(i64),
    SelectAll,
    Copy,
    /// Ask the host to read the clipboard and call back with its text.
    RequestPaste,
    /// Paste an already parsed matrix at the active cell.
    Paste(Vec<Vec<Option<String>>>),
    DeleteSelection,
    /// Open the editor: `Some(text)` replaces the value, `None` edits it.
    BeginEdit(Option<String>),
    Commit,
    Cancel,
    /// Pointer pressed on a logical cell.
    PointerDown { row: u32, col: u32, extend: bool },
    PointerDrag { row: u32, col: u32 },
    PointerUp,
    DoubleClick { row: u32, col: u32 },
    /// Scroll the window by a number of rows.
    Scroll(i64),
    /// Set the first visible row from the scroll indicator.
    ScrollTo(u32),
    /// Insert an empty row below the active row.
    InsertRow,
    /// Delete the active row.
    DeleteRow,
    Sort(usize),
    Clear,
}

/// Notification for the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    /// The model announced a new row count.
    DataChanged { row_count: usize },
    ActiveCellChanged { cell: ActiveCell },
    /// User-facing message (rejected paste, clipboard failure).
    Notice { message: String },
    /// Write `text` to the system clipboard.
    CopyRequested { text: String },
    /// Read the system clipboard and pass the text to `paste_text`.
    PasteRequested,
}

fn arrow(key: &str) -> Option<(i64, i64)> {
    match key {
        "ArrowUp" => Some((-1, 0)),
        "ArrowDown" => Some((1, 0)),
        "ArrowLeft" => Some((0, -1)),
        "ArrowRight" => Some((0, 1)),
        _ => None,
    }
}

fn is_printable(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_control())
}

/// Map a browser key name to an intent for the current cursor mode.
///
/// Returns `None` for keys the grid leaves to the browser (typing into an
/// open editor, caret movement while editing, unbound shortcuts).
pub fn intent_for_key(key: &str, ctrl: bool, shift: bool, mode: CursorMode) -> Option<Intent> {
    let step = if shift { -1 } else { 1 };
    let commit_move = match key {
        "Enter" => Some(Intent::MoveBy {
            rows: step,
            cols: 0,
            extend: false,
        }),
        "Tab" => Some(Intent::MoveBy {
            rows: 0,
            cols: step,
            extend: false,
        }),
        _ => None,
    };

    match mode {
        CursorMode::Edit => match key {
            "Escape" => Some(Intent::Cancel),
            _ => commit_move,
        },
        CursorMode::Input => match key {
            "Escape" => Some(Intent::Cancel),
            _ => commit_move.or_else(|| {
                arrow(key).map(|(rows, cols)| Intent::MoveBy {
                    rows,
                    cols,
                    extend: false,
                })
            }),
        },
        CursorMode::Active if ctrl => match key.to_ascii_lowercase().as_str() {
            "a" => Some(Intent::SelectAll),
            "c" => Some(Intent::Copy),
            "v" => Some(Intent::RequestPaste),
            "-" => Some(Intent::DeleteRow),
            "home" => Some(Intent::MoveBy {
                rows: -FAR,
                cols: -FAR,
                extend: shift,
            }),
            _ => None,
        },
        CursorMode::Active => {
            if let Some((rows, cols)) = arrow(key) {
                return Some(Intent::MoveBy {
                    rows,
                    cols,
                    extend: shift,
                });
            }
            match key {
                "Enter" | "Tab" => commit_move,
                "PageUp" => Some(Intent::PageBy(-1)),
                "PageDown" => Some(Intent::PageBy(1)),
                "Home" => Some(Intent::MoveBy {
                    rows: 0,
                    cols: -FAR,
                    extend: shift,
                }),
                "End" => Some(Intent::MoveBy {
                    rows: 0,
                    cols: FAR,
                    extend: shift,
                }),
                "F2" => Some(Intent::BeginEdit(None)),
                "Delete" | "Backspace" => Some(Intent::DeleteSelection),
                "Insert" => Some(Intent::InsertRow),
                _ if is_printable(key) => Some(Intent::BeginEdit(Some(key.to_string()))),
                _ => None,
            }
        }
    }
}
