//! License API presentation: one flat record per activate, validate or deactivate answer.

use crate::error::LmsqError;
use crate::output::{output_record, FlatResource, OutputMode, OutputOptions};
use serde_json::{Map, Value};

pub const LICENSE_LABEL: &str = "License";

/// Nested members lifted into the record, as `(object, member, record key)`.
const LIFTED: &[(&str, &str, &str)] = &[
    ("license_key", "id", "license_key_id"),
    ("license_key", "status", "license_key_status"),
    ("license_key", "key", "license_key"),
    ("license_key", "activation_limit", "activation_limit"),
    ("license_key", "activation_usage", "activation_usage"),
    ("license_key", "expires_at", "license_key_expires_at"),
    ("instance", "id", "instance_id"),
    ("instance", "name", "instance_name"),
    ("instance", "created_at", "instance_created_at"),
    ("meta", "store_id", "store_id"),
    ("meta", "product_id", "product_id"),
    ("meta", "product_name", "product_name"),
    ("meta", "variant_id", "variant_id"),
    ("meta", "variant_name", "variant_name"),
    ("meta", "customer_id", "customer_id"),
    ("meta", "customer_name", "customer_name"),
    ("meta", "customer_email", "customer_email"),
];

/// Flatten a License API answer. `status_field` (`activated`, `valid`, `deactivated`)
/// comes first, then `error` when set, then the key, instance and meta details.
pub fn license_record(body: &Value, status_field: &str) -> Result<FlatResource, LmsqError> {
    let object = body.as_object().ok_or_else(|| {
        LmsqError::MalformedResponse("License API answer is not an object".to_string())
    })?;

    let mut record = Map::new();
    record.insert(
        status_field.to_string(),
        object.get(status_field).cloned().unwrap_or(Value::Null),
    );
    match object.get("error") {
        None | Some(Value::Null) => {}
        Some(error) => {
            record.insert("error".to_string(), error.clone());
        }
    }
    for (parent, member, key) in LIFTED {
        if let Some(nested) = object.get(*parent).and_then(Value::as_object) {
            record.insert(
                key.to_string(),
                nested.get(*member).cloned().unwrap_or(Value::Null),
            );
        }
    }
    Ok(record)
}

pub fn format_license_result(
    body: &Value,
    status_field: &str,
    mode: OutputMode,
    options: &OutputOptions,
) -> Result<String, LmsqError> {
    let record = license_record(body, status_field)?;
    output_record(body, record, mode, LICENSE_LABEL, options)
}
