//! Copy, paste and delete over the selection.
//!
//! Copy serializes the selection to TSV and asks the host to write it.
//! Paste text comes back from the host, is parsed as TSV and applied at the
//! active cell. Delete is a paste of an all-absent block.

use tracing::{debug, warn};

use super::{to_u32, Grid, GridEvent};
use crate::error::Result;
use crate::model::{DataSource, ViewModel};
use crate::tsv;
use crate::types::{Interval, Position, Rectangle, Selection};

fn extent(n: u64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

impl<M: DataSource + ViewModel> Grid<M> {
    /// TSV text of the selected cells.
    pub fn copy_text(&self) -> String {
        self.model.to_clipboard(&self.selection.rect())
    }

    pub(super) fn copy(&mut self) {
        self.commit_edit();
        let text = self.copy_text();
        debug!(bytes = text.len(), "copy requested");
        self.events.push(GridEvent::CopyRequested { text });
    }

    /// Apply clipboard text at the active cell.
    ///
    /// # Errors
    /// Ragged text is rejected with [`crate::error::GridError::RaggedClipboard`]
    /// before anything is written; the message is also queued as a notice.
    pub fn paste_text(&mut self, text: &str) -> Result<Rectangle> {
        let span = self.span.clone();
        let _entered = span.enter();
        let rows = match tsv::parse(text) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%err, "paste rejected");
                self.notice(err.to_string());
                return Err(err);
            }
        };
        let matrix: Vec<Vec<Option<String>>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        let at = self.cursor.pos;
        self.paste_matrix_at(at, &matrix)
    }

    /// Write `matrix` with its top-left at `at` and select what landed.
    ///
    /// # Errors
    /// An empty first row is rejected with
    /// [`crate::error::GridError::EmptyPaste`]; the message is also queued
    /// as a notice.
    pub fn paste_matrix_at(
        &mut self,
        at: Position,
        matrix: &[Vec<Option<String>>],
    ) -> Result<Rectangle> {
        self.commit_edit();
        let (row, col) = (super::to_usize(at.row), super::to_usize(at.col));
        match self.mutate(|model, sink| model.on_paste(row, col, matrix, sink)) {
            Ok(rect) => {
                let columns = Rectangle::new(
                    Interval::new(0, i64::MAX),
                    Interval::new(0, i64::from(self.viewport.col_count)),
                );
                if let Some(landed) = rect.intersect(&columns) {
                    self.hide_highlights();
                    self.selection = Selection::span(landed.top_left(), landed.bottom_right());
                    self.show_highlights();
                }
                Ok(rect)
            }
            Err(err) => {
                warn!(%err, "paste failed");
                self.notice(err.to_string());
                Err(err)
            }
        }
    }

    /// Clear the selected cells.
    pub fn delete_selection(&mut self) {
        let rect = self.selection.rect();
        let blank = vec![vec![None; extent(rect.width())]; extent(rect.height())];
        debug!(
            rows = to_u32(blank.len()),
            cols = to_u32(extent(rect.width())),
            "delete selection"
        );
        let _ = self.paste_matrix_at(rect.top_left(), &blank);
    }
}
