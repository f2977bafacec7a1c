//! JSON:API envelope flattening.

use crate::error::LmsqError;
use crate::output::fields::FlatResource;
use serde::Serialize;
use serde_json::{Map, Value};

/// Simplified pagination block of a flattened list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub page_count: u64,
}

/// A flattened collection response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatList {
    pub data: Vec<FlatResource>,
    pub meta: PageInfo,
}

/// Flatten a single-resource envelope into `{id, type, ...attributes}`.
///
/// `relationships`, `links` and `jsonapi` are dropped. Attribute values are copied
/// as-is; nested objects and arrays are not flattened further.
pub fn flatten_resource(envelope: &Value) -> Result<FlatResource, LmsqError> {
    let data = envelope
        .get("data")
        .ok_or_else(|| malformed("response has no \"data\" member"))?;
    flatten_item(data)
}

/// Flatten a collection envelope into `{data, meta}`.
///
/// Item order is kept exactly as received. Pagination values are taken from
/// `meta.page` without re-deriving them.
pub fn flatten_list_response(envelope: &Value) -> Result<FlatList, LmsqError> {
    let items = envelope
        .get("data")
        .ok_or_else(|| malformed("response has no \"data\" member"))?
        .as_array()
        .ok_or_else(|| malformed("\"data\" is not an array"))?;

    let page = envelope
        .get("meta")
        .and_then(|meta| meta.get("page"))
        .ok_or_else(|| malformed("response has no \"meta.page\" member"))?;

    let meta = PageInfo {
        total: page_number(page, "total")?,
        page: page_number(page, "currentPage")?,
        page_size: page_number(page, "perPage")?,
        page_count: page_number(page, "lastPage")?,
    };

    let data = items
        .iter()
        .map(flatten_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FlatList { data, meta })
}

/// Flatten a meta-only envelope (generated invoices, current usage) into one record.
///
/// Scalar members of `meta` are copied as-is. Members of nested objects are lifted
/// one level, so `meta.urls.download_invoice_url` becomes `download_invoice_url`.
pub fn flatten_meta(envelope: &Value) -> Result<FlatResource, LmsqError> {
    let meta = envelope
        .get("meta")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("response has no \"meta\" object"))?;

    let mut flat = Map::new();
    for (key, value) in meta {
        match value {
            Value::Object(nested) => {
                for (inner, value) in nested {
                    flat.insert(inner.clone(), value.clone());
                }
            }
            other => {
                flat.insert(key.clone(), other.clone());
            }
        }
    }
    Ok(flat)
}

fn flatten_item(item: &Value) -> Result<FlatResource, LmsqError> {
    let object = item
        .as_object()
        .ok_or_else(|| malformed("resource object expected"))?;

    let id = match object.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(malformed("resource has no \"id\"")),
    };
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("resource has no \"type\""))?;

    let mut flat = Map::new();
    flat.insert("id".to_string(), Value::String(id));
    flat.insert("type".to_string(), Value::String(kind.to_string()));

    match object.get("attributes") {
        None | Some(Value::Null) => {}
        Some(Value::Object(attributes)) => {
            for (key, value) in attributes {
                if key == "id" || key == "type" {
                    continue;
                }
                flat.insert(key.clone(), value.clone());
            }
        }
        Some(_) => return Err(malformed("\"attributes\" is not an object")),
    }

    Ok(flat)
}

fn page_number(page: &Value, key: &str) -> Result<u64, LmsqError> {
    page.get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| malformed(&format!("\"meta.page.{key}\" is missing or not a count")))
}

fn malformed(detail: &str) -> LmsqError {
    LmsqError::MalformedResponse(detail.to_string())
}
