//! Column schema: type, width, sort marker and the value converter.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::convert::{converter_for, ValueConverter};

/// Kind of values a column holds; selects its default converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    #[default]
    String,
    Date,
    Boolean,
}

/// Sort direction marker shown in a column header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Default column width in pixels.
pub const DEFAULT_COLUMN_WIDTH: u32 = 80;

/// Host-facing column description, as received from JavaScript or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default)]
    pub fraction_digits: Option<usize>,
}

fn default_width() -> u32 {
    DEFAULT_COLUMN_WIDTH
}

/// Runtime column schema. Read-only to the grid except for the sort marker.
#[derive(Clone)]
pub struct ColumnSchema {
    pub title: String,
    pub column_type: ColumnType,
    pub width: u32,
    pub fraction_digits: Option<usize>,
    pub sort: Option<SortDirection>,
    pub converter: Rc<dyn ValueConverter>,
}

impl ColumnSchema {
    /// Schema with the default converter for `column_type`.
    pub fn new(title: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            title: title.into(),
            column_type,
            width: DEFAULT_COLUMN_WIDTH,
            fraction_digits: None,
            sort: None,
            converter: converter_for(column_type, None),
        }
    }

    #[must_use]
    pub fn with_fraction_digits(mut self, digits: usize) -> Self {
        self.fraction_digits = Some(digits);
        self.converter = converter_for(self.column_type, Some(digits));
        self
    }

    /// Replace the converter with a host-provided one.
    #[must_use]
    pub fn with_converter(mut self, converter: Rc<dyn ValueConverter>) -> Self {
        self.converter = converter;
        self
    }
}

impl From<&ColumnSpec> for ColumnSchema {
    fn from(spec: &ColumnSpec) -> Self {
        Self {
            title: spec.title.clone(),
            column_type: spec.column_type,
            width: spec.width,
            fraction_digits: spec.fraction_digits,
            sort: None,
            converter: converter_for(spec.column_type, spec.fraction_digits),
        }
    }
}

impl fmt::Debug for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSchema")
            .field("title", &self.title)
            .field("column_type", &self.column_type)
            .field("width", &self.width)
            .field("fraction_digits", &self.fraction_digits)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}
