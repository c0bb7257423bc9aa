//! Render commands for the grid overlay.
//!
//! The grid does not paint. It decides which slot rectangles change color
//! and queues [`RenderCommand`]s; the host drains and applies them.

pub mod selection;

use serde::Serialize;

use crate::types::Rectangle;

/// What a command paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Background of the selected range
    Selection,
    /// Outline of the active cell
    Active,
}

/// Paint `rect` (slot coordinates) with `color`, or clear it when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderCommand {
    pub layer: Layer,
    pub color: Option<String>,
    pub rect: Rectangle,
}

impl RenderCommand {
    pub fn is_clear(&self) -> bool {
        self.color.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{Interval, Position};

    #[test]
    fn commands_serialize_for_the_host() {
        let paint = RenderCommand {
            layer: Layer::Active,
            color: Some("#4285F4".into()),
            rect: Rectangle::cell(Position::new(2, 1)),
        };
        let clear = RenderCommand {
            layer: Layer::Selection,
            color: None,
            rect: Rectangle::new(Interval::new(0, 2), Interval::new(0, 3)),
        };
        let json = serde_json::to_value([clear, paint]).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "layer": "selection",
                    "color": null,
                    "rect": {"row": {"min": 0, "sup": 2}, "col": {"min": 0, "sup": 3}}
                },
                {
                    "layer": "active",
                    "color": "#4285F4",
                    "rect": {"row": {"min": 2, "sup": 3}, "col": {"min": 1, "sup": 2}}
                }
            ])
        );
    }
}
