//! Plain renderer for pipes and agents. Never emits ANSI sequences.

use crate::error::CliError;
use crate::output::fields::{plain_value, FlatResource};
use crate::output::normalize::PageInfo;
use serde_json::Value;

pub fn resource(resource: &FlatResource) -> String {
    resource
        .iter()
        .map(|(key, value)| format!("{}: {}", key, plain_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Blocks separated by a blank line, then `[page P/C, T total]`.
pub fn list(resources: &[FlatResource], meta: &PageInfo) -> String {
    let footer = format!("[page {}/{}, {} total]", meta.page, meta.page_count, meta.total);
    if resources.is_empty() {
        return footer;
    }
    let blocks: Vec<String> = resources.iter().map(resource).collect();
    format!("{}\n\n{}", blocks.join("\n\n"), footer)
}

pub fn ids(ids: &[String], total: u64) -> String {
    let footer = format!("[{} total]", total);
    if ids.is_empty() {
        return footer;
    }
    format!("{}\n{}", ids.join("\n"), footer)
}

pub fn count(total: u64) -> String {
    total.to_string()
}

pub fn pluck(value: &Value) -> String {
    plain_value(value)
}

/// Errors are plain `key: value` lines in both text and pretty mode.
pub fn error(error: &CliError) -> String {
    let mut lines = vec![
        format!("error: {}", error.error),
        format!("message: {}", error.message),
    ];
    if let Some(status) = error.status {
        lines.push(format!("status: {}", status));
    }
    if !error.fields.is_empty() {
        lines.push(format!("fields: {}", error.fields.join(", ")));
    }
    lines.join("\n")
}
