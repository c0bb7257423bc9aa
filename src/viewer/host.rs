//! JavaScript surface of the grid.
//!
//! `GridView` wraps a [`Grid`] for the browser. DOM events arrive as plain
//! method calls (key names, logical cells, wheel deltas); grid events go out
//! through registered callbacks. Clipboard reads and writes run as local
//! futures and report back through the same callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlElement;

use super::{intent_for_key, Grid, GridEvent, Intent};
use crate::editor::InputOverlay;
use crate::error::GridError;
use crate::model::DataModel;
use crate::types::{ColumnSchema, ColumnSpec, GridConfig};

#[derive(Default)]
struct Callbacks {
    data_changed: Option<Function>,
    active_cell: Option<Function>,
    message: Option<Function>,
    render: Option<Function>,
}

type SharedGrid = Rc<RefCell<Grid<DataModel>>>;
type SharedCallbacks = Rc<RefCell<Callbacks>>;

/// The grid widget exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    grid: SharedGrid,
    callbacks: SharedCallbacks,
}

fn call1(callback: Option<Function>, arg: &JsValue) {
    if let Some(callback) = callback {
        let _ = callback.call1(&JsValue::NULL, arg);
    }
}

/// Hand queued grid events to the page.
fn flush(grid: &SharedGrid, callbacks: &SharedCallbacks) {
    let (events, commands) = {
        let mut g = grid.borrow_mut();
        (g.drain_events(), g.drain_render_commands())
    };

    for event in events {
        match event {
            GridEvent::DataChanged { row_count } => {
                #[allow(clippy::cast_precision_loss)]
                let rows = JsValue::from_f64(row_count as f64);
                let callback = callbacks.borrow().data_changed.clone();
                call1(callback, &rows);
            }
            GridEvent::ActiveCellChanged { cell } => {
                if let Ok(value) = serde_wasm_bindgen::to_value(&cell) {
                    let callback = callbacks.borrow().active_cell.clone();
                    call1(callback, &value);
                }
            }
            GridEvent::Notice { message } => {
                let callback = callbacks.borrow().message.clone();
                call1(callback, &JsValue::from_str(&message));
            }
            GridEvent::CopyRequested { text } => write_clipboard(text, Rc::clone(callbacks)),
            GridEvent::PasteRequested => read_clipboard(Rc::clone(grid), Rc::clone(callbacks)),
        }
    }

    if !commands.is_empty() {
        match to_js(&commands) {
            Ok(value) => {
                let render = callbacks.borrow().render.clone();
                call1(render, &value);
            }
            Err(err) => warn!(?err, count = commands.len(), "render commands dropped"),
        }
    }
}

fn report(callbacks: &SharedCallbacks, err: &GridError) {
    warn!(%err, "clipboard");
    let callback = callbacks.borrow().message.clone();
    call1(callback, &JsValue::from_str(&err.to_string()));
}

fn write_clipboard(text: String, callbacks: SharedCallbacks) {
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = window.navigator().clipboard().write_text(&text);
        match JsFuture::from(promise).await {
            Ok(_) => debug!(bytes = text.len(), "clipboard written"),
            Err(e) => report(&callbacks, &GridError::Clipboard(format!("{e:?}"))),
        }
    });
}

fn read_clipboard(grid: SharedGrid, callbacks: SharedCallbacks) {
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = window.navigator().clipboard().read_text();
        match JsFuture::from(promise).await {
            Ok(value) => {
                let text = value.as_string().unwrap_or_default();
                // Rejections are queued as notices by the grid.
                let _ = grid.borrow_mut().paste_text(&text);
                flush(&grid, &callbacks);
            }
            Err(e) => report(&callbacks, &GridError::Clipboard(format!("{e:?}"))),
        }
    });
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

impl GridView {
    fn dispatch(&self, intent: Intent) {
        self.grid.borrow_mut().handle(intent);
        flush(&self.grid, &self.callbacks);
    }

    fn logical_row(&self, slot: u32) -> u32 {
        self.grid.borrow().viewport().first_row.saturating_add(slot)
    }
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid over `rows` (array of row arrays) described by
    /// `columns` (array of `{title, type, width, fractionDigits}`).
    ///
    /// `body` hosts the in-place editor. `config` may be `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        columns: JsValue,
        rows: JsValue,
        config: JsValue,
        body: HtmlElement,
    ) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let specs: Vec<ColumnSpec> = serde_wasm_bindgen::from_value(columns)
            .map_err(|e| GridError::InvalidConfig(format!("columns: {e}")))?;
        if specs.is_empty() {
            return Err(GridError::InvalidConfig("at least one column is required".into()).into());
        }
        let rows: Vec<Vec<serde_json::Value>> = if rows.is_undefined() || rows.is_null() {
            Vec::new()
        } else {
            serde_wasm_bindgen::from_value(rows)
                .map_err(|e| GridError::InvalidConfig(format!("rows: {e}")))?
        };
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| GridError::InvalidConfig(format!("config: {e}")))?
        };

        let schemas = specs.iter().map(ColumnSchema::from).collect();
        let model = DataModel::from_json_rows(schemas, &rows);
        let editor = InputOverlay::new(body, &config.active_color);
        let grid = Grid::with_editor(model, config, Box::new(editor));

        Ok(GridView {
            grid: Rc::new(RefCell::new(grid)),
            callbacks: Rc::new(RefCell::new(Callbacks::default())),
        })
    }

    /// Handle a key press. Returns true when the grid consumed the key and
    /// the page should prevent its default action.
    pub fn on_key_down(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        let mode = self.grid.borrow().active_cell().mode;
        match intent_for_key(key, ctrl, shift, mode) {
            Some(intent) => {
                self.dispatch(intent);
                true
            }
            None => false,
        }
    }

    /// Pointer pressed on row slot `slot` of column `col`.
    pub fn on_pointer_down(&self, slot: u32, col: u32, shift: bool) {
        let row = self.logical_row(slot);
        self.dispatch(Intent::PointerDown {
            row,
            col,
            extend: shift,
        });
    }

    pub fn on_pointer_move(&self, slot: u32, col: u32) {
        if !self.grid.borrow().is_dragging() {
            return;
        }
        let row = self.logical_row(slot);
        self.dispatch(Intent::PointerDrag { row, col });
    }

    pub fn on_pointer_up(&self) {
        self.dispatch(Intent::PointerUp);
    }

    pub fn on_double_click(&self, slot: u32, col: u32) {
        let row = self.logical_row(slot);
        self.dispatch(Intent::DoubleClick { row, col });
    }

    /// Wheel scroll by whole rows.
    pub fn on_wheel(&self, rows: i32) {
        self.dispatch(Intent::Scroll(i64::from(rows)));
    }

    /// The scroll bar moved to `row`.
    pub fn scroll_to(&self, row: u32) {
        self.dispatch(Intent::ScrollTo(row));
    }

    pub fn sort(&self, col: usize) {
        self.dispatch(Intent::Sort(col));
    }

    pub fn insert_row(&self) {
        self.dispatch(Intent::InsertRow);
    }

    pub fn delete_row(&self) {
        self.dispatch(Intent::DeleteRow);
    }

    pub fn clear(&self) {
        self.dispatch(Intent::Clear);
    }

    pub fn resize(&self, viewport_height: f32) {
        self.grid.borrow_mut().resize(viewport_height);
        flush(&self.grid, &self.callbacks);
    }

    pub fn set_data_changed_callback(&self, callback: Option<Function>) {
        self.callbacks.borrow_mut().data_changed = callback;
    }

    pub fn set_active_cell_callback(&self, callback: Option<Function>) {
        self.callbacks.borrow_mut().active_cell = callback;
    }

    pub fn set_message_callback(&self, callback: Option<Function>) {
        self.callbacks.borrow_mut().message = callback;
    }

    /// Called with the queued render commands (`[{layer, color, rect}]`,
    /// slot coordinates, `color: null` clears) in the order they must be
    /// applied.
    pub fn set_render_callback(&self, callback: Option<Function>) {
        self.callbacks.borrow_mut().render = callback;
    }

    /// Formatted text of the visible rows.
    pub fn visible_text(&self) -> Result<JsValue, JsValue> {
        to_js(&self.grid.borrow().visible_text())
    }

    /// Current highlights as paint commands, for a full repaint.
    pub fn highlights(&self) -> Result<JsValue, JsValue> {
        let grid = self.grid.borrow();
        let config = grid.config();
        let commands = crate::render::selection::show(
            grid.viewport(),
            grid.selection(),
            grid.active_cell().pos,
            config,
        );
        to_js(&commands)
    }

    pub fn first_row(&self) -> u32 {
        self.grid.borrow().viewport().first_row
    }

    pub fn row_count(&self) -> u32 {
        self.grid.borrow().viewport().row_count
    }

    /// Scroll bar state `{max, value}`.
    pub fn indicator(&self) -> Result<JsValue, JsValue> {
        to_js(self.grid.borrow().indicator())
    }

    /// Selection bounds as `[min_row, min_col, max_row, max_col]`.
    pub fn selection(&self) -> Vec<u32> {
        let (r0, c0, r1, c1) = self.grid.borrow().selection().bounds();
        vec![r0, c0, r1, c1]
    }

    /// Mutations recorded since the last call.
    pub fn take_patches(&self) -> Result<JsValue, JsValue> {
        let patches = self.grid.borrow_mut().take_patches();
        to_js(&patches)
    }

    /// The full matrix as a JSON string.
    pub fn rows_json(&self) -> Result<String, JsValue> {
        let grid = self.grid.borrow();
        serde_json::to_string(&grid.model().to_json_rows())
            .map_err(|e| GridError::from(e).into())
    }
}
