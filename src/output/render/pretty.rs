//! Decorated renderer for interactive terminals.

use crate::output::fields::FlatResource;
use crate::output::normalize::PageInfo;
use crate::output::render::{cell_text, column_widths, title_case, Column};
use owo_colors::OwoColorize;
use serde_json::Value;

const MIN_RULE_WIDTH: usize = 30;
const COLUMN_GAP: &str = "  ";

/// Detail view: bold `{label} #{id}` header, a rule, then one line per field.
/// Records without an id get the bare label as header.
pub fn resource(resource: &FlatResource, label: &str) -> String {
    let header = match resource.get("id") {
        Some(id) => format!("{} #{}", label, cell_text(Some(id))),
        None => label.to_string(),
    };
    let rule = "═".repeat(header.chars().count().max(MIN_RULE_WIDTH));

    let mut lines = vec![header.bold().to_string(), rule.dimmed().to_string(), String::new()];
    for (key, value) in resource.iter().filter(|(key, _)| key.as_str() != "id") {
        let field_label = format!("{}:", title_case(key));
        lines.push(format!(
            "  {}  {}",
            field_label.dimmed(),
            styled_value(value)
        ));
    }
    lines.join("\n")
}

/// Aligned table with a pagination summary and a next-page hint.
///
/// An empty page still gets the header, the separator and the summary.
pub fn list(resources: &[FlatResource], columns: &[Column<'_>], meta: &PageInfo) -> String {
    let widths = column_widths(columns, resources);

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column.label, *width).bold().to_string())
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    let separator = widths
        .iter()
        .map(|width| "─".repeat(*width).dimmed().to_string())
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    let mut lines = vec![header, separator];
    for row in resources {
        let cells = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| styled_cell(row.get(column.key), *width))
            .collect::<Vec<_>>();
        lines.push(cells.join(COLUMN_GAP));
    }

    let from = meta.page.saturating_sub(1) * meta.page_size + 1;
    let to = (from + resources.len() as u64)
        .saturating_sub(1)
        .min(meta.total);
    lines.push(String::new());
    lines.push(
        format!(
            "Showing {}-{} of {} results (page {} of {})",
            from, to, meta.total, meta.page, meta.page_count
        )
        .dimmed()
        .to_string(),
    );

    if meta.page < meta.page_count {
        lines.push(
            format!("→ Use --page {} to see the next page", meta.page + 1)
                .yellow()
                .to_string(),
        );
    }

    lines.join("\n")
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

fn styled_cell(value: Option<&Value>, width: usize) -> String {
    let text = pad(&cell_text(value), width);
    match value {
        Some(Value::Bool(true)) => text.green().to_string(),
        Some(Value::Bool(false)) => text.red().to_string(),
        _ => text,
    }
}

fn styled_value(value: &Value) -> String {
    match value {
        Value::Null => "null".dimmed().to_string(),
        Value::Bool(true) => "true".green().to_string(),
        Value::Bool(false) => "false".red().to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
