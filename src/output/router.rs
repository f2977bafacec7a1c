//! Entry points that take a raw envelope to a rendered string.

use crate::error::{CliError, LmsqError};
use crate::output::fields::{extract_ids, pluck_field, select_fields, FlatResource};
use crate::output::mode::{OutputMode, OutputOptions};
use crate::output::normalize::{flatten_list_response, flatten_resource, FlatList};
use crate::output::render::{json, pretty, text, title_case, Column};
use serde_json::Value;

/// Render a single-resource envelope.
///
/// `json-raw` prints `raw` as received. Otherwise the envelope is flattened, and
/// `pluck` (if set) wins over `fields` and the mode's full rendering.
pub fn output_resource(
    raw: &Value,
    mode: OutputMode,
    label: &str,
    options: &OutputOptions,
) -> Result<String, LmsqError> {
    if mode == OutputMode::JsonRaw {
        return json::document(raw);
    }

    let flat = flatten_resource(raw)?;
    render_record(flat, mode, label, options)
}

/// Render a record that does not come from a `data` member: meta-only answers and
/// License API results. `json-raw` still prints `raw` as received.
pub fn output_record(
    raw: &Value,
    record: FlatResource,
    mode: OutputMode,
    label: &str,
    options: &OutputOptions,
) -> Result<String, LmsqError> {
    if mode == OutputMode::JsonRaw {
        return json::document(raw);
    }
    render_record(record, mode, label, options)
}

fn render_record(
    flat: FlatResource,
    mode: OutputMode,
    label: &str,
    options: &OutputOptions,
) -> Result<String, LmsqError> {
    if let Some(field) = options.pluck.as_deref() {
        let value = pluck_field(&flat, field)?;
        return match mode {
            OutputMode::Json => json::pluck(value),
            _ => Ok(text::pluck(value)),
        };
    }

    let selected = apply_fields(flat, options)?;
    match mode {
        OutputMode::Json | OutputMode::JsonRaw => json::document(&selected),
        OutputMode::Pretty => Ok(pretty::resource(&selected, label)),
        OutputMode::Text => Ok(text::resource(&selected)),
    }
}

/// Render a collection envelope.
///
/// Shortcuts are checked in order: `count`, then `only_ids`, then field selection.
/// `columns` only matter in pretty mode; an `ID` column is always prepended.
pub fn output_list(
    raw: &Value,
    mode: OutputMode,
    columns: &[Column<'_>],
    options: &OutputOptions,
) -> Result<String, LmsqError> {
    if mode == OutputMode::JsonRaw {
        return json::document(raw);
    }

    let list = flatten_list_response(raw)?;

    if options.count {
        return match mode {
            OutputMode::Json => json::count(list.meta.total),
            _ => Ok(text::count(list.meta.total)),
        };
    }

    if options.only_ids {
        let ids = extract_ids(&list.data);
        return match mode {
            OutputMode::Json => json::ids(&ids, &list.meta),
            _ => Ok(text::ids(&ids, list.meta.total)),
        };
    }

    match mode {
        OutputMode::Json | OutputMode::JsonRaw => {
            let data = list
                .data
                .into_iter()
                .map(|r| apply_fields(r, options))
                .collect::<Result<Vec<_>, _>>()?;
            json::document(&FlatList {
                data,
                meta: list.meta,
            })
        }
        OutputMode::Pretty => pretty_table(&list, columns, options),
        OutputMode::Text => {
            let data = list
                .data
                .into_iter()
                .map(|r| apply_fields(r, options))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(text::list(&data, &list.meta))
        }
    }
}

/// Render a classified error. JSON modes get a JSON document, the rest plain lines.
pub fn output_error(error: &CliError, mode: OutputMode) -> String {
    if mode.is_json() {
        json::error(error).unwrap_or_else(|_| text::error(error))
    } else {
        text::error(error)
    }
}

fn apply_fields(resource: FlatResource, options: &OutputOptions) -> Result<FlatResource, LmsqError> {
    match options.fields.as_deref() {
        Some(fields) => select_fields(&resource, fields),
        None => Ok(resource),
    }
}

fn pretty_table(
    list: &FlatList,
    columns: &[Column<'_>],
    options: &OutputOptions,
) -> Result<String, LmsqError> {
    let id_column = Column::new("id", "ID");

    let Some(fields) = options.fields.as_deref() else {
        let mut active = Vec::with_capacity(columns.len() + 1);
        active.push(id_column);
        active.extend(columns.iter().copied().filter(|c| c.key != "id"));
        return Ok(pretty::list(&list.data, &active, &list.meta));
    };

    for resource in &list.data {
        select_fields(resource, fields)?;
    }

    let requested: Vec<&String> = fields.iter().filter(|f| f.as_str() != "id").collect();
    let labels: Vec<String> = requested.iter().map(|f| title_case(f)).collect();
    let mut active = Vec::with_capacity(requested.len() + 1);
    active.push(id_column);
    for (field, label) in requested.iter().zip(&labels) {
        let column = columns
            .iter()
            .find(|c| c.key == field.as_str())
            .copied()
            .unwrap_or_else(|| Column::new(field.as_str(), label.as_str()));
        active.push(column);
    }
    Ok(pretty::list(&list.data, &active, &list.meta))
}
