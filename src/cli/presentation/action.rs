//! Action presentation: results of write commands and meta-only answers.

use crate::error::LmsqError;
use crate::output::{flatten_meta, output_record, output_resource, OutputMode, OutputOptions};
use serde_json::Value;

/// Render the returned resource, or `message` when the API answered with no body.
pub fn format_action_result(
    data: Option<&Value>,
    mode: OutputMode,
    label: &str,
    options: &OutputOptions,
    message: &str,
) -> Result<String, LmsqError> {
    match data {
        Some(envelope) => output_resource(envelope, mode, label, options),
        None => Ok(message.to_string()),
    }
}

/// Like [`format_action_result`] for answers that carry only `meta`
/// (generated invoices, current usage).
pub fn format_meta_result(
    data: Option<&Value>,
    mode: OutputMode,
    label: &str,
    options: &OutputOptions,
    message: &str,
) -> Result<String, LmsqError> {
    match data {
        Some(envelope) => output_record(envelope, flatten_meta(envelope)?, mode, label, options),
        None => Ok(message.to_string()),
    }
}
