//! DOM input overlay for cell editing.
//!
//! An `<input>` element positioned over the active cell inside the grid
//! body. Key handling stays with the grid; the overlay only holds text.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::{CellEditor, EditorRect};

/// Input overlay for cell editing.
pub struct InputOverlay {
    container: HtmlElement,
    border_color: String,
    input: Option<HtmlInputElement>,
}

impl InputOverlay {
    /// Overlay appended to `container` on first use.
    pub fn new(container: HtmlElement, border_color: &str) -> Self {
        InputOverlay {
            container,
            border_color: border_color.to_string(),
            input: None,
        }
    }

    fn input(&mut self) -> Option<&HtmlInputElement> {
        if self.input.is_none() {
            let document = web_sys::window().and_then(|w| w.document())?;
            self.input = self.create_input(&document);
        }
        self.input.as_ref()
    }

    fn create_input(&self, document: &Document) -> Option<HtmlInputElement> {
        let input = document
            .create_element("input")
            .ok()?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        input.set_type("text");
        let style = input.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("z-index", "10");
        let _ = style.set_property("box-sizing", "border-box");
        let _ = style.set_property("border", &format!("2px solid {}", self.border_color));
        let _ = style.set_property("outline", "none");
        let _ = style.set_property("padding", "0 4px");
        let _ = style.set_property("font", "inherit");
        let _ = style.set_property("display", "none");
        let _ = self.container.append_child(&input);
        Some(input)
    }
}

impl CellEditor for InputOverlay {
    fn open(&mut self, rect: EditorRect, text: &str) {
        let [x, y, w, h] = rect;
        let Some(input) = self.input() else {
            return;
        };
        let style = input.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{x}px"));
        let _ = style.set_property("top", &format!("{y}px"));
        let _ = style.set_property("width", &format!("{w}px"));
        let _ = style.set_property("height", &format!("{h}px"));
        input.set_value(text);
        let _ = input.focus();
        input.select();
    }

    fn text(&self) -> String {
        self.input.as_ref().map(HtmlInputElement::value).unwrap_or_default()
    }

    fn set_text(&mut self, text: &str) {
        if let Some(input) = self.input.as_ref() {
            input.set_value(text);
        }
    }

    fn close(&mut self) {
        if let Some(input) = self.input.as_ref() {
            let _ = input.style().set_property("display", "none");
            let _ = input.blur();
        }
    }

    fn is_open(&self) -> bool {
        self.input
            .as_ref()
            .and_then(|i| i.style().get_property_value("display").ok())
            .is_some_and(|d| d != "none")
    }
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        if let Some(input) = self.input.as_ref() {
            if let Some(parent) = input.parent_node() {
                let _ = parent.remove_child(input);
            }
        }
    }
}
