// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal CSV row codec
//!
//! Fields are quoted only when they contain the delimiter, a quote, or a
//! line break. Embedded quotes are doubled. Rows end with `\n`.

pub const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Encode one row, including its terminating newline
pub fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut row = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            row.push(DELIMITER);
        }
        let field = field.as_ref();
        if needs_quoting(field) {
            row.push(QUOTE);
            row.push_str(&field.replace(QUOTE, "\"\""));
            row.push(QUOTE);
        } else {
            row.push_str(field);
        }
    }
    row.push('\n');
    row
}

fn needs_quoting(field: &str) -> bool {
    field.contains([DELIMITER, QUOTE, '\n', '\r'])
}

/// Length of the longest prefix of `bytes` that ends on a row boundary.
///
/// Anything past it is an incomplete row.
pub fn complete_len(bytes: &[u8]) -> usize {
    let mut in_quotes = false;
    let mut boundary = 0;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => boundary = i + 1,
            _ => {}
        }
    }
    boundary
}

/// Split text into rows of unescaped fields.
///
/// A trailing row without a newline is still returned.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.push(QUOTE);
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            QUOTE if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            DELIMITER => {
                row.push(std::mem::take(&mut field));
                at_field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                at_field_start = true;
            }
            other => {
                field.push(other);
                at_field_start = false;
            }
        }
    }

    if !at_field_start || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
