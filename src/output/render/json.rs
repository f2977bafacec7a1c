//! JSON renderer. Documents are pretty-printed; shortcut answers are compact.

use crate::error::{CliError, LmsqError};
use crate::output::normalize::PageInfo;
use serde::Serialize;
use serde_json::{json, Value};

pub fn document<T: Serialize + ?Sized>(value: &T) -> Result<String, LmsqError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn compact<T: Serialize + ?Sized>(value: &T) -> Result<String, LmsqError> {
    Ok(serde_json::to_string(value)?)
}

pub fn count(total: u64) -> Result<String, LmsqError> {
    compact(&json!({ "count": total }))
}

pub fn ids(ids: &[String], meta: &PageInfo) -> Result<String, LmsqError> {
    compact(&json!({ "ids": ids, "meta": meta }))
}

pub fn pluck(value: &Value) -> Result<String, LmsqError> {
    compact(value)
}

pub fn error(error: &CliError) -> Result<String, LmsqError> {
    document(error)
}
