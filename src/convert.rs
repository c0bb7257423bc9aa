//! Value converters: the string form of each column type.
//!
//! A converter must round-trip: `parse(&format(v)) == v` for every value its
//! column type can represent. The grid never asks a converter to parse the
//! empty string; empty input is treated as an absent cell before it gets here.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::types::{CellValue, ColumnType};

/// Date format used for display and parsing.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// String conversion for one column.
pub trait ValueConverter: fmt::Debug {
    /// Display text for a present value.
    fn format(&self, value: &CellValue) -> String;
    /// Value for non-empty user or clipboard text.
    fn parse(&self, text: &str) -> CellValue;
}

/// Numbers, optionally with a fixed number of fraction digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberConverter {
    pub fraction_digits: Option<usize>,
}

impl ValueConverter for NumberConverter {
    fn format(&self, value: &CellValue) -> String {
        match (value, self.fraction_digits) {
            (CellValue::Number(n), Some(digits)) => format!("{n:.digits$}"),
            _ => value.to_string(),
        }
    }

    fn parse(&self, text: &str) -> CellValue {
        match text.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(text.to_string()),
        }
    }
}

/// Plain text; the identity conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

impl ValueConverter for TextConverter {
    fn format(&self, value: &CellValue) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> CellValue {
        CellValue::Text(text.to_string())
    }
}

/// Calendar dates in `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConverter;

impl ValueConverter for DateConverter {
    fn format(&self, value: &CellValue) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> CellValue {
        match NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) {
            Ok(date) => CellValue::Date(date),
            Err(_) => CellValue::Text(text.to_string()),
        }
    }
}

/// `true` / `false`, case-insensitive on input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

impl ValueConverter for BooleanConverter {
    fn format(&self, value: &CellValue) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> CellValue {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            CellValue::Boolean(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            CellValue::Boolean(false)
        } else {
            CellValue::Text(text.to_string())
        }
    }
}

/// Default converter for a column type.
pub fn converter_for(
    column_type: ColumnType,
    fraction_digits: Option<usize>,
) -> Rc<dyn ValueConverter> {
    match column_type {
        ColumnType::Number => Rc::new(NumberConverter { fraction_digits }),
        ColumnType::String => Rc::new(TextConverter),
        ColumnType::Date => Rc::new(DateConverter),
        ColumnType::Boolean => Rc::new(BooleanConverter),
    }
}

/// Narrowest column type whose converter accepts every non-empty sample.
///
/// Columns with no samples, or with mixed kinds, are strings.
pub fn infer_column_type<'a>(samples: impl IntoIterator<Item = &'a str>) -> ColumnType {
    let candidates = [ColumnType::Number, ColumnType::Date, ColumnType::Boolean];
    let mut alive = [true; 3];
    let mut seen = false;
    for text in samples.into_iter().filter(|t| !t.is_empty()) {
        seen = true;
        for (kind, ok) in candidates.iter().zip(alive.iter_mut()) {
            if *ok && matches!(converter_for(*kind, None).parse(text), CellValue::Text(_)) {
                *ok = false;
            }
        }
    }
    candidates
        .iter()
        .zip(alive)
        .find(|(_, ok)| seen && *ok)
        .map_or(ColumnType::String, |(kind, _)| *kind)
}
