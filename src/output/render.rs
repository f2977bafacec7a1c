//! Renderers, one per output mode.
//!
//! `json` and `text` are safe for pipes and agents. `pretty` is the only renderer
//! that emits ANSI styling.

pub(crate) mod json;
pub(crate) mod pretty;
pub(crate) mod text;

use crate::output::fields::{plain_value, FlatResource};
use serde_json::Value;

/// A column of the pretty list table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'a> {
    pub key: &'a str,
    pub label: &'a str,
    /// Fixed width; computed from the data when `None`.
    pub width: Option<usize>,
}

impl<'a> Column<'a> {
    pub const fn new(key: &'a str, label: &'a str) -> Self {
        Self {
            key,
            label,
            width: None,
        }
    }

    pub const fn fixed(key: &'a str, label: &'a str, width: usize) -> Self {
        Self {
            key,
            label,
            width: Some(width),
        }
    }
}

const MIN_COLUMN_WIDTH: usize = 4;

/// Width of each column: the configured width, or the widest of header, cells and 4.
pub fn column_widths(columns: &[Column<'_>], rows: &[FlatResource]) -> Vec<usize> {
    columns
        .iter()
        .map(|column| {
            column.width.unwrap_or_else(|| {
                let widest_cell = rows
                    .iter()
                    .map(|row| cell_text(row.get(column.key)).chars().count())
                    .max()
                    .unwrap_or(0);
                column
                    .label
                    .chars()
                    .count()
                    .max(widest_cell)
                    .max(MIN_COLUMN_WIDTH)
            })
        })
        .collect()
}

/// Table cell text. Missing and null values leave the cell empty.
pub(crate) fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => plain_value(value),
    }
}

/// `snake_case` key to `Title Case` label.
pub fn title_case(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut at_word_start = true;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphanumeric() {
            if at_word_start {
                label.extend(ch.to_uppercase());
            } else {
                label.push(ch);
            }
            at_word_start = false;
        } else {
            label.push(ch);
            at_word_start = true;
        }
    }
    label
}
