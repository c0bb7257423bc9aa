//! Structured error types for vgrid.
//!
//! Everything that can be reported to the user (bad clipboard text, empty
//! pastes, clipboard failures) goes through [`GridError`].

/// All errors that can occur in grid parsing, mutation and clipboard handling.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Clipboard text whose rows have unequal field counts.
    #[error("Clipboard data must be rectangular: line {line} has {found} fields, expected {expected}")]
    RaggedClipboard {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Paste source without any columns.
    #[error("Nothing to paste")]
    EmptyPaste,

    /// Clipboard permission or I/O failure at the browser boundary.
    #[error("Clipboard: {0}")]
    Clipboard(String),

    /// Rejected host configuration (columns, rows or grid options).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
