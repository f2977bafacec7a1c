//! Resource commands end to end: request building, actions, and exit codes.

use crate::integration::test_utils::{fixture, run_cli, with_xdg_env, MockTransport};
use lmsq::api::{ApiResponse, Method};
use lmsq::error::LmsqError;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_list_sends_filters_and_paging() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("order_list.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &[
                "lmsq", "orders", "list", "--store-id", "7", "--user-email", "a@b.co",
                "--page", "3", "--page-size", "20", "--include", "store", "--api-key", "k",
            ],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.exit_code, 0);

    let request = transport.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/orders");
    assert_eq!(request.query_value("filter[store_id]"), Some("7"));
    assert_eq!(request.query_value("filter[user_email]"), Some("a@b.co"));
    assert_eq!(request.query_value("page[number]"), Some("3"));
    assert_eq!(request.query_value("page[size]"), Some("20"));
    assert_eq!(request.query_value("include"), Some("store"));
}

#[test]
fn test_first_requests_single_item() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("order_list.json"));

    with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "orders", "list", "--first", "--page-size", "50", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(transport.last_request().query_value("page[size]"), Some("1"));
}

#[test]
fn test_list_text_output_through_cli() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("order_list.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "orders", "list", "--only-ids", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.stdout(), "12345\n12346\n12347\n[47 total]");
}

#[test]
fn test_count_json_through_cli() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("order_list.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "orders", "list", "--count", "--only-ids", "-j", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.stdout(), r#"{"count":47}"#);
}

#[test]
fn test_invalid_filter_fails_before_request() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "stores", "list", "--status", "active", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.exit_code, 2);
    assert!(run.stderr().starts_with("error: invalid_usage\n"));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_invalid_include_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "orders", "get", "1", "--include", "bogus", "-j", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.exit_code, 2);
    let parsed: Value = serde_json::from_str(run.stderr()).unwrap();
    assert_eq!(parsed["error"], "invalid_usage");
    assert_eq!(parsed["fields"], json!(["bogus"]));
}

#[test]
fn test_get_with_pluck() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("single_order.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "orders", "get", "12345", "--pluck", "total", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.stdout(), "4900");
    assert_eq!(transport.last_request().path, "/orders/12345");
}

#[test]
fn test_missing_api_key_exits_with_auth_code() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();

    let run = with_xdg_env(&dir, || {
        run_cli(&dir, &["lmsq", "stores", "list"], Arc::clone(&transport))
    });
    assert_eq!(run.exit_code, 3);
    assert!(run.stderr().starts_with("error: auth_error\n"));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_api_failure_status_codes() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport
        .respond(ApiResponse::failure("Not found", 404))
        .respond(ApiResponse::failure("Unauthenticated.", 401));

    let (not_found, unauthorized) = with_xdg_env(&dir, || {
        let args = ["lmsq", "orders", "get", "9", "--api-key", "k"];
        (
            run_cli(&dir, &args, Arc::clone(&transport)),
            run_cli(&dir, &args, Arc::clone(&transport)),
        )
    });
    assert_eq!(not_found.exit_code, 1);
    assert_eq!(
        not_found.stderr(),
        "error: api_error\nmessage: Not found\nstatus: 404"
    );
    assert_eq!(unauthorized.exit_code, 3);
}

#[test]
fn test_network_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.fail(LmsqError::Network("Connection error: refused".to_string()));

    let run = with_xdg_env(&dir, || {
        run_cli(&dir, &["lmsq", "stores", "list", "--api-key", "k"], Arc::clone(&transport))
    });
    assert_eq!(run.exit_code, 4);
    assert!(run.stderr().starts_with("error: network_error\n"));
}

#[test]
fn test_full_refund_has_no_body() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond(ApiResponse::empty());

    let run = with_xdg_env(&dir, || {
        run_cli(&dir, &["lmsq", "orders", "refund", "42", "--api-key", "k"], Arc::clone(&transport))
    });
    assert_eq!(run.stdout(), "Order 42 fully refunded.");
    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/orders/42/refund");
    assert!(request.body.is_none());
}

#[test]
fn test_partial_refund_body() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("single_order.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &[
                "lmsq", "subscription-invoices", "refund", "8", "--amount", "250", "--pluck",
                "status", "--api-key", "k",
            ],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.stdout(), "paid");
    let request = transport.last_request();
    assert_eq!(request.path, "/subscription-invoices/8/refund");
    assert_eq!(
        request.body,
        Some(json!({
            "data": {"type": "subscription-invoices", "id": "8", "attributes": {"amount": 250}}
        }))
    );
}

#[test]
fn test_cancel_subscription_renders_result() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("single_subscription.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "subscriptions", "cancel", "555", "-f", "status", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.stdout(), "id: 555\nstatus: cancelled");
    let request = transport.last_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.path, "/subscriptions/555");
}

#[test]
fn test_archive_customer_patch() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond(ApiResponse::empty());

    let run = with_xdg_env(&dir, || {
        run_cli(&dir, &["lmsq", "customers", "archive", "3", "--api-key", "k"], Arc::clone(&transport))
    });
    assert_eq!(run.stdout(), "Customer 3 archived successfully.");
    let request = transport.last_request();
    assert_eq!(request.method, Method::Patch);
    assert_eq!(
        request.body.unwrap()["data"]["attributes"]["status"],
        "archived"
    );
}

#[test]
fn test_delete_webhook_message() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond(ApiResponse::empty());

    let run = with_xdg_env(&dir, || {
        run_cli(&dir, &["lmsq", "webhooks", "delete", "5", "--api-key", "k"], Arc::clone(&transport))
    });
    assert_eq!(run.stdout(), "Webhook deleted.");
    assert_eq!(transport.last_request().path, "/webhooks/5");
}

#[test]
fn test_user_command() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("user.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(&dir, &["lmsq", "user", "--pluck", "email", "--api-key", "k"], Arc::clone(&transport))
    });
    assert_eq!(run.stdout(), "darlene@example.com");
    assert_eq!(transport.last_request().path, "/users/me");
}

#[test]
fn test_json_raw_passthrough_through_cli() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(fixture("order_list.json"));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "orders", "list", "--json-raw", "--json", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    let parsed: Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(parsed, fixture("order_list.json"));
}

#[test]
fn test_order_invoice_prints_download_link() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(json!({
        "jsonapi": {"version": "1.0"},
        "meta": {"urls": {"download_invoice_url": "https://app.lemonsqueezy.com/my-orders/1/invoice"}}
    }));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &[
                "lmsq", "orders", "invoice", "12345", "--name", "Jane Doe", "--country", "US",
                "--pluck", "download_invoice_url", "--api-key", "k",
            ],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.stdout(), "https://app.lemonsqueezy.com/my-orders/1/invoice");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/orders/12345/generate-invoice");
    assert_eq!(request.query_value("name"), Some("Jane Doe"));
    assert_eq!(request.query_value("country"), Some("US"));
    assert_eq!(request.query_value("notes"), None);
}

#[test]
fn test_subscription_item_usage_as_json() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(json!({
        "jsonapi": {"version": "1.0"},
        "meta": {
            "period_start": "2023-08-10T13:08:16+00:00",
            "period_end": "2023-09-10T13:03:16+00:00",
            "quantity": 5,
            "interval_unit": "month",
            "interval_quantity": 1
        }
    }));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "subscription-items", "usage", "9", "-j", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    let parsed: Value = serde_json::from_str(run.stdout()).unwrap();
    assert_eq!(parsed["quantity"], 5);
    assert_eq!(parsed["interval_unit"], "month");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/subscription-items/9/current-usage");
}

#[test]
fn test_license_validate_needs_no_api_key() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(json!({
        "valid": true,
        "error": null,
        "license_key": {"id": 1, "status": "active", "key": "38b1460a-5104-4067-a91d-77b872934d51"},
        "instance": null,
        "meta": {"store_id": 1, "product_name": "Example Product"}
    }));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &[
                "lmsq", "licenses", "validate", "--key", "38b1460a-5104-4067-a91d-77b872934d51",
                "--pluck", "valid",
            ],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.exit_code, 0);
    assert_eq!(run.stdout(), "true");

    let request = transport.last_request();
    assert_eq!(request.path, "/licenses/validate");
    assert_eq!(
        request.form_value("license_key"),
        Some("38b1460a-5104-4067-a91d-77b872934d51")
    );
    assert_eq!(request.form_value("instance_id"), None);
    assert!(request.body.is_none());
}

#[test]
fn test_customer_create_sends_store_relationship() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();
    transport.respond_with(json!({
        "data": {
            "type": "customers",
            "id": "77",
            "attributes": {"name": "Jane Doe", "email": "jane@example.com", "status": "subscribed"}
        }
    }));

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &[
                "lmsq", "customers", "create", "--store-id", "1", "--name", "Jane Doe",
                "--email", "jane@example.com", "--pluck", "id", "--api-key", "k",
            ],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.stdout(), "77");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/customers");
    let body = request.body.unwrap();
    assert_eq!(body["data"]["type"], "customers");
    assert_eq!(body["data"]["attributes"]["email"], "jane@example.com");
    assert_eq!(
        body["data"]["relationships"]["store"]["data"],
        json!({"type": "stores", "id": "1"})
    );
}

#[test]
fn test_update_without_changes_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let transport = MockTransport::new();

    let run = with_xdg_env(&dir, || {
        run_cli(
            &dir,
            &["lmsq", "customers", "update", "77", "--api-key", "k"],
            Arc::clone(&transport),
        )
    });
    assert_eq!(run.exit_code, 2);
    assert!(run.stderr().contains("Nothing to update"));
    assert!(transport.requests().is_empty());
}
