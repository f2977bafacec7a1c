//! Field selection for `--fields`, `--pluck` and `--only-ids`.

use crate::error::LmsqError;
use serde_json::{Map, Value};

/// A flattened resource: `id`, `type`, then the attributes in server order.
pub type FlatResource = Map<String, Value>;

fn unknown_field(resource: &FlatResource, field: &str) -> LmsqError {
    LmsqError::UnknownField {
        field: field.to_string(),
        valid: resource.keys().cloned().collect(),
    }
}

/// Restrict a resource to `id` plus the requested fields, in request order.
///
/// `id` is always kept, whether or not it was asked for. The first requested name
/// missing from the resource is reported, together with every valid key.
pub fn select_fields(resource: &FlatResource, fields: &[String]) -> Result<FlatResource, LmsqError> {
    if let Some(missing) = fields
        .iter()
        .find(|field| field.as_str() != "id" && !resource.contains_key(field.as_str()))
    {
        return Err(unknown_field(resource, missing));
    }

    let mut selected = Map::new();
    if let Some(id) = resource.get("id") {
        selected.insert("id".to_string(), id.clone());
    }
    for field in fields.iter().filter(|f| f.as_str() != "id") {
        if let Some(value) = resource.get(field.as_str()) {
            selected.insert(field.clone(), value.clone());
        }
    }
    Ok(selected)
}

/// Value of a single field.
pub fn pluck_field<'a>(resource: &'a FlatResource, field: &str) -> Result<&'a Value, LmsqError> {
    resource
        .get(field)
        .ok_or_else(|| unknown_field(resource, field))
}

/// Ids of every resource, stringified, in input order.
pub fn extract_ids(resources: &[FlatResource]) -> Vec<String> {
    resources
        .iter()
        .map(|r| r.get("id").map(plain_value).unwrap_or_default())
        .collect()
}

/// Undecorated string form of a JSON value.
///
/// Strings are printed bare, `null` as the literal `null`, objects and arrays as
/// compact JSON, everything else via its natural display.
pub fn plain_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
