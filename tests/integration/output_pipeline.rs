//! Output pipeline against realistic API envelopes: mode selection, field
//! selection, list shortcuts, and error rendering.

use crate::integration::test_utils::fixture;
use lmsq::error::{classify_error, get_exit_code, CliError, ErrorKind, LmsqError};
use lmsq::output::{
    output_error, output_list, output_resource, resolve_output_mode, OutputMode, OutputOptions,
};
use lmsq::resources::ORDERS;
use serde_json::{json, Value};

fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn fields(names: &[&str]) -> OutputOptions {
    OutputOptions {
        fields: Some(names.iter().map(|s| s.to_string()).collect()),
        ..Default::default()
    }
}

#[test]
fn test_json_raw_is_passthrough() {
    let raw = fixture("single_order.json");
    let out = output_resource(&raw, OutputMode::JsonRaw, "Order", &fields(&["nope"])).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, raw);
}

#[test]
fn test_flattened_json_drops_envelope() {
    let raw = fixture("single_order.json");
    let out = output_resource(&raw, OutputMode::Json, "Order", &OutputOptions::default()).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], "12345");
    assert_eq!(parsed["type"], "orders");
    assert_eq!(parsed["user_email"], "alice@example.com");
    assert_eq!(parsed["first_order_item"]["product_name"], "Pro Plan");
    assert!(parsed.get("relationships").is_none());
    assert!(parsed.get("links").is_none());
    assert!(parsed.get("jsonapi").is_none());
}

#[test]
fn test_json_fields_keep_requested_order() {
    let raw = fixture("single_order.json");
    let out = output_resource(&raw, OutputMode::Json, "Order", &fields(&["total", "status"]))
        .unwrap();
    let parsed: serde_json::Map<String, Value> = serde_json::from_str(&out).unwrap();
    let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "total", "status"]);
}

#[test]
fn test_text_resource_lines() {
    let raw = fixture("single_order.json");
    let out = output_resource(&raw, OutputMode::Text, "Order", &fields(&["status", "refunded_at"]))
        .unwrap();
    assert_eq!(out, "id: 12345\nstatus: paid\nrefunded_at: null");
}

#[test]
fn test_unknown_field_is_usage_error() {
    let raw = fixture("single_order.json");
    let err = output_resource(&raw, OutputMode::Text, "Order", &fields(&["bogus"])).unwrap_err();
    assert!(err.to_string().starts_with("Unknown field \"bogus\". Valid fields: "));

    let classified = classify_error(&err);
    assert_eq!(classified.error, ErrorKind::InvalidUsage);
    assert_eq!(classified.fields, vec!["bogus".to_string()]);
    assert_eq!(get_exit_code(&classified), 2);
}

#[test]
fn test_pluck_wins_over_fields() {
    let raw = fixture("single_order.json");
    let options = OutputOptions {
        pluck: Some("user_email".to_string()),
        fields: Some(vec!["status".to_string()]),
        ..Default::default()
    };
    assert_eq!(
        output_resource(&raw, OutputMode::Text, "Order", &options).unwrap(),
        "alice@example.com"
    );
    assert_eq!(
        output_resource(&raw, OutputMode::Json, "Order", &options).unwrap(),
        "\"alice@example.com\""
    );
}

#[test]
fn test_text_list_blocks_and_footer() {
    let raw = fixture("order_list.json");
    let out = output_list(&raw, OutputMode::Text, ORDERS.columns, &fields(&["status"])).unwrap();
    assert_eq!(
        out,
        "id: 12345\nstatus: paid\n\nid: 12346\nstatus: refunded\n\nid: 12347\nstatus: pending\n\n[page 1/10, 47 total]"
    );
}

#[test]
fn test_json_list_meta_is_simplified() {
    let raw = fixture("order_list.json");
    let out = output_list(&raw, OutputMode::Json, ORDERS.columns, &OutputOptions::default())
        .unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        parsed["meta"],
        json!({"total": 47, "page": 1, "pageSize": 5, "pageCount": 10})
    );
    let ids: Vec<&str> = parsed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["12345", "12346", "12347"]);
}

#[test]
fn test_count_beats_only_ids() {
    let raw = fixture("order_list.json");
    let options = OutputOptions {
        count: true,
        only_ids: true,
        ..Default::default()
    };
    assert_eq!(
        output_list(&raw, OutputMode::Text, ORDERS.columns, &options).unwrap(),
        "47"
    );
    assert_eq!(
        output_list(&raw, OutputMode::Json, ORDERS.columns, &options).unwrap(),
        r#"{"count":47}"#
    );
}

#[test]
fn test_only_ids() {
    let raw = fixture("order_list.json");
    let options = OutputOptions {
        only_ids: true,
        ..Default::default()
    };
    assert_eq!(
        output_list(&raw, OutputMode::Text, ORDERS.columns, &options).unwrap(),
        "12345\n12346\n12347\n[47 total]"
    );
}

#[test]
fn test_pretty_list_table() {
    let raw = fixture("order_list.json");
    let out = output_list(&raw, OutputMode::Pretty, ORDERS.columns, &OutputOptions::default())
        .unwrap();
    let plain = strip_ansi(&out);
    let lines: Vec<&str> = plain.lines().collect();
    assert!(lines[0].starts_with("ID"));
    assert!(lines[0].contains("Order #"));
    assert!(lines[1].starts_with('─'));
    assert!(lines[2].starts_with("12345"));
    assert!(plain.contains("Showing 1-3 of 47 results (page 1 of 10)"));
    assert!(plain.contains("→ Use --page 2 to see the next page"));
}

#[test]
fn test_pretty_empty_list() {
    let raw = fixture("empty_list.json");
    let out = output_list(&raw, OutputMode::Pretty, ORDERS.columns, &OutputOptions::default())
        .unwrap();
    let plain = strip_ansi(&out);
    let lines: Vec<&str> = plain.lines().collect();
    assert!(lines[0].starts_with("ID"));
    assert!(lines[0].contains("Order #"));
    assert!(lines[0].contains("Status        "));
    assert!(lines[1].starts_with('─'));
    assert_eq!(lines.last().copied(), Some("Showing 1-0 of 0 results (page 1 of 1)"));
    assert!(!plain.contains("Use --page"));
}

#[test]
fn test_pretty_resource_detail() {
    let raw = fixture("single_order.json");
    let out = output_resource(&raw, OutputMode::Pretty, "Order", &fields(&["status"])).unwrap();
    let plain = strip_ansi(&out);
    let lines: Vec<&str> = plain.lines().collect();
    assert_eq!(lines[0], "Order #12345");
    assert!(lines[1].chars().all(|c| c == '═'));
    assert_eq!(lines[2], "");
    assert_eq!(lines[3].trim(), "Status:  paid");
}

#[test]
fn test_mode_resolution_with_terminal() {
    let interactive = true;
    assert_eq!(
        resolve_output_mode(&OutputOptions::default(), interactive),
        OutputMode::Pretty
    );
    assert_eq!(
        resolve_output_mode(&OutputOptions::default(), !interactive),
        OutputMode::Text
    );
    let both = OutputOptions {
        json: true,
        json_raw: true,
        ..Default::default()
    };
    assert_eq!(resolve_output_mode(&both, interactive), OutputMode::JsonRaw);
}

#[test]
fn test_malformed_envelope_is_api_error() {
    let err = output_list(&json!({"data": {}}), OutputMode::Text, ORDERS.columns, &OutputOptions::default())
        .unwrap_err();
    assert!(matches!(err, LmsqError::MalformedResponse(_)));
    let classified = classify_error(&err);
    assert_eq!(classified.error, ErrorKind::ApiError);
    assert_eq!(get_exit_code(&classified), 1);
}

#[test]
fn test_error_rendering_per_mode() {
    let error = CliError::new(ErrorKind::ApiError, "Not found").with_status(404);
    assert_eq!(
        output_error(&error, OutputMode::Text),
        "error: api_error\nmessage: Not found\nstatus: 404"
    );
    assert_eq!(
        output_error(&error, OutputMode::Pretty),
        output_error(&error, OutputMode::Text)
    );
    let parsed: Value = serde_json::from_str(&output_error(&error, OutputMode::JsonRaw)).unwrap();
    assert_eq!(
        parsed,
        json!({"error": "api_error", "message": "Not found", "status": 404})
    );
}
