//! Highlight commands for the selection and the active cell.
//!
//! Logical rectangles are shifted into slot coordinates and clipped to the
//! window; anything off screen produces no command.

use super::{Layer, RenderCommand};
use crate::layout::Viewport;
use crate::types::{GridConfig, Position, Rectangle, Selection};

/// Command painting the on-screen part of `rect`, if any.
pub fn paint(
    viewport: &Viewport,
    layer: Layer,
    rect: &Rectangle,
    color: Option<&str>,
) -> Option<RenderCommand> {
    viewport.to_viewport(rect).map(|rect| RenderCommand {
        layer,
        color: color.map(str::to_string),
        rect,
    })
}

/// Commands clearing the current highlights.
pub fn hide(viewport: &Viewport, selection: &Selection, active: Position) -> Vec<RenderCommand> {
    [
        paint(viewport, Layer::Selection, &selection.rect(), None),
        paint(viewport, Layer::Active, &Rectangle::cell(active), None),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Commands painting the current highlights.
pub fn show(
    viewport: &Viewport,
    selection: &Selection,
    active: Position,
    config: &GridConfig,
) -> Vec<RenderCommand> {
    [
        paint(
            viewport,
            Layer::Selection,
            &selection.rect(),
            Some(&config.selection_color),
        ),
        paint(
            viewport,
            Layer::Active,
            &Rectangle::cell(active),
            Some(&config.active_color),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
