//! The grid controller: selection, active cell, viewport and editing.
//!
//! [`Grid`] owns the data model, the row window it pulls into and all
//! cursor state. Hosts drive it with [`Intent`]s and drain two queues:
//! - render commands for the highlight overlay;
//! - [`GridEvent`]s (data changed, active cell changed, notices and
//!   clipboard requests).
//!
//! Everything here is synchronous. Clipboard reads and writes are requested
//! through events and completed by the host.

mod clipboard;
pub mod events;
#[cfg(target_arch = "wasm32")]
mod host;
mod navigation;
mod scroll;

pub use events::{intent_for_key, GridEvent, Intent};
#[cfg(target_arch = "wasm32")]
pub use host::GridView;
pub use scroll::ScrollIndicator;

use tracing::{debug, info, info_span, Span};

use crate::editor::{ActiveCell, CellEditor, CursorMode, EditorRect, TextBuffer};
use crate::layout::{RowWindow, Viewport};
use crate::model::{DataModel, DataSource, Patch, ViewModel};
use crate::render::{selection as highlight, RenderCommand};
use crate::types::{GridConfig, Position, Selection, DEFAULT_COLUMN_WIDTH};

pub(crate) fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

pub(crate) fn to_usize(n: u32) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

/// Virtualized grid over a data model.
pub struct Grid<M = DataModel> {
    model: M,
    window: RowWindow,
    viewport: Viewport,
    selection: Selection,
    cursor: ActiveCell,
    editor: Box<dyn CellEditor>,
    indicator: ScrollIndicator,
    config: GridConfig,
    dragging: bool,
    commands: Vec<RenderCommand>,
    events: Vec<GridEvent>,
    span: Span,
}

impl<M: DataSource + ViewModel> Grid<M> {
    /// Grid with a headless editor.
    pub fn new(model: M, config: GridConfig) -> Self {
        Self::with_editor(model, config, Box::new(TextBuffer::new()))
    }

    pub fn with_editor(mut model: M, config: GridConfig, editor: Box<dyn CellEditor>) -> Self {
        let span = info_span!("grid", name = %config.name);
        let mut window = RowWindow::new();
        model.init(&mut window);
        let data_rows = window
            .take_announced()
            .unwrap_or_else(|| model.row_count());
        let viewport = Viewport::new(
            config.view_port_row_count(),
            to_u32(data_rows),
            to_u32(model.schemas().len()),
        );

        let mut grid = Self {
            model,
            window,
            viewport,
            selection: Selection::default(),
            cursor: ActiveCell::default(),
            editor,
            indicator: ScrollIndicator::default(),
            config,
            dragging: false,
            commands: Vec::new(),
            events: Vec::new(),
            span,
        };
        grid.indicator.set_max(grid.viewport.row_count);
        grid.pull_window();
        grid.show_highlights();
        {
            let _entered = grid.span.enter();
            debug!(
                rows = data_rows,
                cols = grid.viewport.col_count,
                slots = grid.viewport.capacity,
                "grid attached"
            );
        }
        grid
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn window(&self) -> &RowWindow {
        &self.window
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_cell(&self) -> ActiveCell {
        self.cursor
    }

    pub fn indicator(&self) -> &ScrollIndicator {
        &self.indicator
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn editor(&self) -> &dyn CellEditor {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> &mut dyn CellEditor {
        self.editor.as_mut()
    }

    /// Apply one user intent.
    pub fn handle(&mut self, intent: Intent) {
        let span = self.span.clone();
        let _entered = span.enter();
        match intent {
            Intent::MoveBy { rows, cols, extend } => self.navigate(rows, cols, extend),
            Intent::PageBy(pages) => {
                let rows = pages.saturating_mul(i64::from(self.config.page_size()));
                self.navigate(rows, 0, false);
            }
            Intent::SelectAll => self.select_all(),
            Intent::Copy => self.copy(),
            Intent::RequestPaste => {
                self.commit_edit();
                self.events.push(GridEvent::PasteRequested);
            }
            Intent::Paste(matrix) => {
                let at = self.cursor.pos;
                // Failures are already reported as notices.
                let _ = self.paste_matrix_at(at, &matrix);
            }
            Intent::DeleteSelection => self.delete_selection(),
            Intent::BeginEdit(text) => self.begin_edit(text),
            Intent::Commit => self.commit_edit(),
            Intent::Cancel => self.cancel_edit(),
            Intent::PointerDown { row, col, extend } => {
                self.pointer_down(Position::new(row, col), extend);
            }
            Intent::PointerDrag { row, col } => self.pointer_drag(Position::new(row, col)),
            Intent::PointerUp => self.dragging = false,
            Intent::DoubleClick { row, col } => {
                self.pointer_down(Position::new(row, col), false);
                self.dragging = false;
                self.begin_edit(None);
            }
            Intent::Scroll(delta) => self.scroll_by(delta),
            Intent::ScrollTo(row) => {
                let first = row.min(self.viewport.max_first_row());
                self.set_first_row(first, true);
            }
            Intent::InsertRow => self.insert_row(),
            Intent::DeleteRow => self.delete_row(),
            Intent::Sort(col) => self.sort(col),
            Intent::Clear => self.clear(),
        }
    }

    /// Render commands queued since the last drain.
    pub fn drain_render_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Formatted text of every slot in the window; rows past the data and
    /// absent cells are empty strings.
    pub fn visible_text(&self) -> Vec<Vec<String>> {
        let schemas = self.model.schemas();
        (self.viewport.first_row..self.viewport.end_row())
            .map(|row| {
                let row = to_usize(row);
                schemas
                    .iter()
                    .enumerate()
                    .map(|(col, schema)| {
                        self.window
                            .value(row, col)
                            .map(|v| schema.converter.format(v))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }

    /// Change the container height, keeping the first row.
    pub fn resize(&mut self, viewport_height: f32) {
        self.config.viewport_height = viewport_height;
        self.hide_highlights();
        self.viewport.resize(self.config.view_port_row_count());
        self.indicator.set_max(self.viewport.row_count);
        self.pull_window();
        self.show_highlights();
    }

    // ---- editing ----

    fn begin_edit(&mut self, text: Option<String>) {
        let pos = self.cursor.pos;
        if !self.viewport.contains_row(pos.row) {
            let first = self.viewport.first_row_showing(pos.row);
            self.set_first_row(first, false);
        }
        let (mode, text) = match text {
            Some(text) => (CursorMode::Input, text),
            None => (CursorMode::Edit, self.formatted(pos)),
        };
        self.cursor.begin(mode);
        let rect = self.editor_rect();
        self.editor.open(rect, &text);
        debug!(row = pos.row, col = pos.col, ?mode, "edit started");
        self.active_changed();
    }

    /// Write the editor's text to the active cell and return to `Active`.
    ///
    /// Empty text clears the cell; anything else goes through the column
    /// converter. Does nothing when no edit is open.
    pub fn commit_edit(&mut self) {
        if !self.cursor.is_editing() {
            return;
        }
        let pos = self.cursor.pos;
        let text = self.editor.text();
        self.editor.close();
        self.cursor.finish();

        let (row, col) = (to_usize(pos.row), to_usize(pos.col));
        let value = if text.is_empty() {
            None
        } else {
            self.model
                .schemas()
                .get(col)
                .map(|schema| schema.converter.parse(&text))
        };
        self.mutate(|model, sink| model.on_cell_change(row, col, value, sink));
        debug!(row, col, "edit committed");
        self.active_changed();
    }

    fn cancel_edit(&mut self) {
        if !self.cursor.is_editing() {
            return;
        }
        self.editor.close();
        self.cursor.finish();
        debug!("edit cancelled");
        self.active_changed();
    }

    fn formatted(&self, pos: Position) -> String {
        let col = to_usize(pos.col);
        match (
            self.model.value(to_usize(pos.row), col),
            self.model.schemas().get(col),
        ) {
            (Some(value), Some(schema)) => schema.converter.format(value),
            (Some(value), None) => value.to_string(),
            _ => String::new(),
        }
    }

    /// Pixel box of the active cell relative to the grid body.
    #[allow(clippy::cast_precision_loss)]
    fn editor_rect(&self) -> EditorRect {
        let pos = self.cursor.pos;
        let col = to_usize(pos.col);
        let schemas = self.model.schemas();
        let x: u32 = schemas.iter().take(col).map(|s| s.width).sum();
        let width = schemas.get(col).map_or(DEFAULT_COLUMN_WIDTH, |s| s.width);
        let slot = pos.row.saturating_sub(self.viewport.first_row);
        let height = self.config.row_height;
        [x as f32, slot as f32 * height, width as f32, height]
    }

    // ---- pointer ----

    fn clamp_col(&self, pos: Position) -> Position {
        Position::new(pos.row, pos.col.min(self.viewport.col_count.saturating_sub(1)))
    }

    fn pointer_down(&mut self, pos: Position, extend: bool) {
        self.commit_edit();
        let pos = self.clamp_col(pos);
        self.hide_highlights();
        if extend {
            self.selection.expand(pos);
        } else {
            self.selection.set(pos);
            self.move_cursor(pos);
        }
        self.dragging = true;
        self.show_highlights();
    }

    fn pointer_drag(&mut self, pos: Position) {
        if !self.dragging {
            return;
        }
        let pos = self.clamp_col(pos);
        if pos == self.selection.head() {
            return;
        }
        self.hide_highlights();
        self.selection.expand(pos);
        self.show_highlights();
    }

    fn select_all(&mut self) {
        self.commit_edit();
        let last = Position::new(
            to_u32(self.model.row_count()).saturating_sub(1),
            self.viewport.col_count.saturating_sub(1),
        );
        self.hide_highlights();
        self.selection = Selection::span(Position::default(), last);
        self.show_highlights();
    }

    // ---- row operations ----

    fn insert_row(&mut self) {
        self.commit_edit();
        let row = to_usize(self.cursor.pos.row);
        self.mutate(|model, sink| model.on_row_insert(row, sink));
    }

    fn delete_row(&mut self) {
        self.commit_edit();
        let row = to_usize(self.cursor.pos.row);
        self.mutate(|model, sink| model.on_row_delete(row, sink));
    }

    fn sort(&mut self, col: usize) {
        self.commit_edit();
        if col >= self.model.schemas().len() {
            return;
        }
        let direction = self.mutate(|model, sink| model.on_sort(col, sink));
        info!(col, ?direction, "sort applied");
    }

    fn clear(&mut self) {
        self.commit_edit();
        self.mutate(|model, sink| model.on_clear(sink));
        self.hide_highlights();
        self.selection = Selection::default();
        self.move_cursor(Position::default());
        self.viewport.first_row = 0;
        self.viewport.set_data_rows(0);
        self.move_window(0, false);
        self.show_highlights();
    }

    // ---- plumbing ----

    /// Run a model mutation with highlights lifted, then re-pull the window.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut M, &mut RowWindow) -> R) -> R {
        self.hide_highlights();
        let out = f(&mut self.model, &mut self.window);
        self.after_data_change();
        self.show_highlights();
        out
    }

    /// React to a row count announced by the model.
    fn after_data_change(&mut self) {
        let Some(count) = self.window.take_announced() else {
            return;
        };
        self.viewport.set_data_rows(to_u32(count));
        self.indicator.set_max(self.viewport.row_count);
        self.pull_window();
        debug!(rows = count, "data changed");
        self.events.push(GridEvent::DataChanged { row_count: count });
    }

    fn pull_window(&mut self) {
        let first = to_usize(self.viewport.first_row);
        let last = to_usize(self.viewport.end_row());
        self.model
            .set_viewport_range(first, last, &mut self.window);
    }

    fn move_cursor(&mut self, pos: Position) {
        if self.cursor.pos != pos {
            self.cursor.pos = pos;
            self.active_changed();
        }
    }

    fn active_changed(&mut self) {
        self.events.push(GridEvent::ActiveCellChanged { cell: self.cursor });
    }

    fn notice(&mut self, message: String) {
        self.events.push(GridEvent::Notice { message });
    }

    fn hide_highlights(&mut self) {
        self.commands.extend(highlight::hide(
            &self.viewport,
            &self.selection,
            self.cursor.pos,
        ));
    }

    fn show_highlights(&mut self) {
        self.commands.extend(highlight::show(
            &self.viewport,
            &self.selection,
            self.cursor.pos,
            &self.config,
        ));
    }
}

impl Grid<DataModel> {
    /// Drain the model's patch log.
    pub fn take_patches(&mut self) -> Vec<Patch> {
        self.model.take_patches()
    }
}
