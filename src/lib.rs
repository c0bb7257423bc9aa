//! vgrid - virtualized editable grid engine for the web
//!
//! The engine behind a spreadsheet-like table widget:
//! - Rectangular selection and an active-cell cursor over a logical grid
//! - A fixed window of materialized rows over a potentially large matrix
//! - Keyboard and pointer navigation with in-place editing
//! - TSV clipboard copy/paste, row insert/delete, column sort
//!
//! Painting and DOM construction stay with the host; the grid emits render
//! commands and events.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'vgrid';
//! await init();
//! const grid = new GridView(columns, rows, { rowHeight: 24 }, body);
//! grid.set_render_callback((commands) => applyHighlights(commands));
//! body.addEventListener('keydown', (e) => {
//!   if (grid.on_key_down(e.key, e.ctrlKey || e.metaKey, e.shiftKey)) e.preventDefault();
//! });
//! ```

pub mod convert;
pub mod editor;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod tsv;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use error::{GridError, Result};
pub use model::{DataModel, DataSource, Patch, RowSink, ViewModel};
#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;
pub use viewer::{intent_for_key, Grid, GridEvent, Intent};

pub use types::*;

/// Parse tab-separated clipboard text and return the rows as a JSON string
///
/// # Errors
/// Returns an error if the rows have different field counts.
#[wasm_bindgen]
pub fn parse_tsv(text: &str) -> std::result::Result<String, JsValue> {
    let rows = tsv::parse(text).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&rows)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
