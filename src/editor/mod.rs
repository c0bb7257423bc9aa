//! Active cell and in-place editing.
//!
//! The active cell is the focused position plus a [`CursorMode`]:
//! - `Active`: focused, not editing;
//! - `Input`: a printable key started an edit that replaces the value;
//! - `Edit`: a double click (or F2) opened the current value for editing.
//!
//! The text itself lives in a [`CellEditor`]. Headless builds use
//! [`TextBuffer`]; the wasm host uses an `<input>` overlay.

#[cfg(target_arch = "wasm32")]
mod input;

#[cfg(target_arch = "wasm32")]
pub use input::InputOverlay;

use serde::Serialize;

use crate::types::Position;

/// Editing state of the active cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    #[default]
    Active,
    Input,
    Edit,
}

/// The focused cell. Exactly one exists per grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActiveCell {
    pub pos: Position,
    pub mode: CursorMode,
}

impl ActiveCell {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            mode: CursorMode::Active,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode != CursorMode::Active
    }

    /// Enter `Input` or `Edit`.
    ///
    /// # Panics
    /// Starting an edit while one is open is a control-flow bug upstream and
    /// fails hard.
    pub fn begin(&mut self, mode: CursorMode) {
        assert!(
            !self.is_editing(),
            "edit started at {:?} while already in {:?} mode",
            self.pos,
            self.mode
        );
        self.mode = mode;
    }

    /// Back to `Active`.
    pub fn finish(&mut self) {
        self.mode = CursorMode::Active;
    }
}

/// Pixel placement of the in-place editor, `[x, y, w, h]` relative to the
/// grid body.
pub type EditorRect = [f32; 4];

/// In-place text editor shown over the active cell.
pub trait CellEditor {
    /// Show the editor with `text`, selecting it all.
    fn open(&mut self, rect: EditorRect, text: &str);
    /// Current text.
    fn text(&self) -> String;
    /// Replace the text (typing into a headless editor, tests).
    fn set_text(&mut self, text: &str);
    fn close(&mut self);
    fn is_open(&self) -> bool;
}

/// Editor without a DOM, for the CLI and tests.
#[derive(Debug, Default, Clone)]
pub struct TextBuffer {
    text: String,
    rect: Option<EditorRect>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the editor was last opened, while open.
    pub fn rect(&self) -> Option<EditorRect> {
        self.rect
    }
}

impl CellEditor for TextBuffer {
    fn open(&mut self, rect: EditorRect, text: &str) {
        self.rect = Some(rect);
        self.text = text.to_string();
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn close(&mut self) {
        self.rect = None;
        self.text.clear();
    }

    fn is_open(&self) -> bool {
        self.rect.is_some()
    }
}
