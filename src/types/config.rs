use serde::{Deserialize, Serialize};

/// How an upward move that would leave row 0 is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpwardBoundary {
    /// Any move past the top lands on row 0.
    #[default]
    Snap,
    /// A single step lands on row 0; a larger jump leaves the row unchanged.
    Absorb,
}

/// Configuration for the grid viewport and highlighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Name recorded on the grid's tracing span
    pub name: String,
    /// Height of one row in pixels (24px default)
    pub row_height: f32,
    /// Height of the scrollable body in pixels
    pub viewport_height: f32,
    /// Rows moved by PageUp/PageDown; defaults to the visible row count
    pub page_size: Option<u32>,
    /// Policy for moving up past row 0
    pub upward_boundary: UpwardBoundary,
    /// Background color for the selected range
    pub selection_color: String,
    /// Outline color for the active cell
    pub active_color: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            name: "grid".to_string(),
            row_height: 24.0,
            viewport_height: 480.0,
            page_size: None,
            upward_boundary: UpwardBoundary::Snap,
            selection_color: "#CFD8E8".to_string(),
            active_color: "#4285F4".to_string(),
        }
    }
}

impl GridConfig {
    /// Number of materialized row slots: container height ÷ row height, at least one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn view_port_row_count(&self) -> u32 {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return 1;
        }
        let rows = (self.viewport_height / self.row_height).floor();
        if !rows.is_finite() || rows < 1.0 {
            1
        } else {
            rows.min(u32::MAX as f32) as u32
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .filter(|&n| n > 0)
            .unwrap_or_else(|| self.view_port_row_count())
    }
}
