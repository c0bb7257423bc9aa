//! TSV codec for clipboard interchange.
//!
//! [`parse`] turns clipboard text into a rectangular matrix of strings;
//! [`serialize`] writes a rectangle of the data matrix back out, formatting
//! each present cell through its column's converter.

use crate::error::{GridError, Result};
use crate::types::{ColumnSchema, Rectangle, Row};

/// Field separator used for clipboard text.
pub const TAB: char = '\t';

/// Row terminator written by [`serialize`].
pub const CRLF: &str = "\r\n";

/// Parse clipboard text into rows of fields.
///
/// Lines end at `\n` or `\r\n`. A field that starts with `"` is quoted: it
/// runs across line breaks and separators until the closing quote, and `""`
/// inside it is a literal quote. A final line terminator does not produce an
/// extra row, and empty input parses as a single empty field.
///
/// # Errors
/// Returns [`GridError::RaggedClipboard`] if the rows have different field counts.
pub fn parse(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Nothing consumed since the last line break.
    let mut line_start = true;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() => {
                in_quotes = true;
                line_start = false;
            }
            TAB => {
                row.push(std::mem::take(&mut field));
                line_start = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                line_start = true;
            }
            _ => {
                field.push(ch);
                line_start = false;
            }
        }
    }

    // An unterminated quote keeps what it collected.
    if !line_start || rows.is_empty() {
        row.push(field);
        rows.push(row);
    }

    check_rectangular(&rows)?;
    Ok(rows)
}

fn check_rectangular(rows: &[Vec<String>]) -> Result<()> {
    let Some(expected) = rows.first().map(Vec::len) else {
        return Ok(());
    };
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(GridError::RaggedClipboard {
                expected,
                found: row.len(),
                line: idx + 1,
            });
        }
    }
    Ok(())
}

/// Serialize the cells of `rect` as separated text.
///
/// Absent cells and rows past the end of `data` become empty fields. Rows are
/// joined with CRLF; fields that contain the separator, a line break or a
/// quote are quoted so that [`parse`] gives back the formatted strings.
pub fn serialize(
    schemas: &[ColumnSchema],
    rect: &Rectangle,
    data: &[Row],
    separator: char,
) -> String {
    let mut out = String::new();
    for (n, row_idx) in rect.row.indices().enumerate() {
        if n > 0 {
            out.push_str(CRLF);
        }
        let row = data.get(row_idx);
        for (m, col_idx) in rect.col.indices().enumerate() {
            if m > 0 {
                out.push(separator);
            }
            let value = row.and_then(|r| r.get(col_idx)).and_then(Option::as_ref);
            if let Some(value) = value {
                let text = match schemas.get(col_idx) {
                    Some(schema) => schema.converter.format(value),
                    None => value.to_string(),
                };
                out.push_str(&escape_field(&text, separator));
            }
        }
    }
    out
}

/// Quote a field if it contains the separator, a line break or a quote.
pub fn escape_field(value: &str, separator: char) -> String {
    let needs_quoting = value.contains(separator)
        || value.contains('\n')
        || value.contains('\r')
        || value.contains('"');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{CellValue, ColumnType, Interval};
    use test_case::test_case;

    fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| (*s).to_string()).collect())
            .collect()
    }

    #[test_case("1\t2\r\n3\t4\r\n", &[&["1", "2"], &["3", "4"]] ; "crlf with trailing terminator")]
    #[test_case("1\t2\r\n3\t", &[&["1", "2"], &["3", ""]] ; "trailing empty field")]
    #[test_case("\r\n", &[&[""]] ; "bare terminator")]
    #[test_case("", &[&[""]] ; "empty input")]
    #[test_case("1\t\"foo\r\nbar\"\r\n2\t3", &[&["1", "foo\r\nbar"], &["2", "3"]] ; "quoted line break")]
    #[test_case("2\t\"3\"\"\"", &[&["2", "3\""]] ; "doubled quote")]
    #[test_case("a\nb\n", &[&["a"], &["b"]] ; "lf only")]
    #[test_case("\"x\ty\"\tz", &[&["x\ty", "z"]] ; "quoted separator")]
    #[test_case("a\"b\tc", &[&["a\"b", "c"]] ; "quote inside unquoted field")]
    #[test_case("\"\"", &[&[""]] ; "quoted empty field")]
    fn parse_literal(text: &str, expected: &[&[&str]]) {
        assert_eq!(parse(text).unwrap(), strings(expected));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse("1\t2\r\n3").unwrap_err();
        match err {
            GridError::RaggedClipboard {
                expected,
                found,
                line,
            } => {
                assert_eq!((expected, found, line), (2, 1, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err_message_mentions_rectangular("a\tb\nc\td\te"));
    }

    fn err_message_mentions_rectangular(text: &str) -> bool {
        parse(text)
            .map_err(|e| e.to_string().contains("rectangular"))
            .unwrap_err()
    }

    fn schemas() -> Vec<ColumnSchema> {
        vec![
            ColumnSchema::new("n", ColumnType::Number),
            ColumnSchema::new("s", ColumnType::String),
            ColumnSchema::new("b", ColumnType::Boolean),
        ]
    }

    fn data() -> Vec<Row> {
        vec![
            vec![
                Some(CellValue::Number(1.5)),
                Some(CellValue::Text("a\tb".into())),
                Some(CellValue::Boolean(true)),
            ],
            vec![Some(CellValue::Number(2.0))],
            vec![None, Some(CellValue::Text("say \"hi\"\r\nbye".into())), None],
        ]
    }

    #[test]
    fn serialize_formats_and_quotes() {
        let rect = Rectangle::new(Interval::new(0, 3), Interval::new(0, 3));
        let text = serialize(&schemas(), &rect, &data(), TAB);
        assert_eq!(
            text,
            "1.5\t\"a\tb\"\ttrue\r\n2\t\t\r\n\t\"say \"\"hi\"\"\r\nbye\"\t"
        );
    }

    #[test]
    fn serialize_treats_missing_rows_as_blank() {
        let rect = Rectangle::new(Interval::new(1, 5), Interval::new(0, 2));
        let text = serialize(&schemas(), &rect, &data(), TAB);
        assert_eq!(text, "2\t\r\n\t\"say \"\"hi\"\"\r\nbye\"\r\n\t\r\n\t");
    }

    #[test]
    fn round_trip_reproduces_formatted_strings() {
        let schemas = schemas();
        let data = data();
        let rect = Rectangle::new(Interval::new(0, 3), Interval::new(0, 3));
        let parsed = parse(&serialize(&schemas, &rect, &data, TAB)).unwrap();
        for (r, row) in parsed.iter().enumerate() {
            for (c, field) in row.iter().enumerate() {
                let expected = data[r]
                    .get(c)
                    .and_then(Option::as_ref)
                    .map(|v| schemas[c].converter.format(v))
                    .unwrap_or_default();
                assert_eq!(field, &expected, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_field("plain", TAB), "plain");
        assert_eq!(escape_field("a,b", ','), "\"a,b\"");
    }
}
