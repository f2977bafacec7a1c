//! CLI requests: JSON:API documents for write commands and License API forms.
//!
//! Absent flags are left out of the document, so the API keeps the current value.

use crate::api::ApiRequest;
use crate::cli::params::parse_comma_separated;
use crate::cli::parse::{
    CheckoutCreateArgs, CustomerCreateArgs, CustomerUpdateArgs, DiscountCreateArgs, InvoiceArgs,
    LicenseCommand, LicenseKeyUpdateArgs, SubscriptionItemUpdateArgs, SubscriptionUpdateArgs,
    UsageRecordCreateArgs, WebhookCreateArgs, WebhookUpdateArgs,
};
use crate::error::LmsqError;
use crate::resources::{
    ResourceSpec, CHECKOUTS, CUSTOMERS, DISCOUNTS, LICENSE_KEYS, STORES, SUBSCRIPTIONS,
    SUBSCRIPTION_ITEMS, USAGE_RECORDS, VARIANTS, WEBHOOKS,
};
use serde_json::{json, Map, Value};

type Attributes = Map<String, Value>;

fn put(attributes: &mut Attributes, key: &str, value: impl Into<Value>) {
    attributes.insert(key.to_string(), value.into());
}

fn put_some<T: Into<Value>>(attributes: &mut Attributes, key: &str, value: Option<T>) {
    if let Some(value) = value {
        put(attributes, key, value);
    }
}

/// `{"data": {"type", "id"?, "attributes", "relationships"?}}`
fn document(
    kind: &str,
    id: Option<&str>,
    attributes: Attributes,
    relationships: Attributes,
) -> Value {
    let mut data = Map::new();
    data.insert("type".to_string(), Value::String(kind.to_string()));
    if let Some(id) = id {
        data.insert("id".to_string(), Value::String(id.to_string()));
    }
    data.insert("attributes".to_string(), Value::Object(attributes));
    if !relationships.is_empty() {
        data.insert("relationships".to_string(), Value::Object(relationships));
    }
    json!({ "data": data })
}

fn to_one(spec: &ResourceSpec, id: &str) -> Value {
    json!({ "data": { "type": spec.command, "id": id } })
}

fn nothing_to_update(flags: &str) -> LmsqError {
    LmsqError::InvalidArgument(format!("Nothing to update. Pass at least one of {}", flags))
}

/// Comma-separated numeric IDs, e.g. `--variant-ids 100,200`.
pub fn parse_id_list(flag: &str, value: &str) -> Result<Vec<u64>, LmsqError> {
    parse_comma_separated(value)
        .iter()
        .map(|item| {
            item.parse::<u64>().map_err(|_| {
                LmsqError::InvalidArgument(format!(
                    "{} expects comma-separated numeric IDs, got \"{}\"",
                    flag, item
                ))
            })
        })
        .collect()
}

/// `POST {item}/generate-invoice` with the billing details as query parameters.
pub fn invoice_request(spec: &ResourceSpec, args: &InvoiceArgs) -> ApiRequest {
    let params = [
        ("name", &args.name),
        ("address", &args.address),
        ("city", &args.city),
        ("state", &args.state),
        ("zip_code", &args.zip_code),
        ("country", &args.country),
        ("notes", &args.notes),
        ("locale", &args.locale),
    ];
    params.into_iter().fold(
        ApiRequest::post(format!("{}/generate-invoice", spec.item_path(&args.id))),
        |request, (key, value)| match value {
            Some(value) => request.with_query(key, value.as_str()),
            None => request,
        },
    )
}

pub fn subscription_update_request(args: &SubscriptionUpdateArgs) -> Result<ApiRequest, LmsqError> {
    let mut attributes = Attributes::new();
    put_some(&mut attributes, "variant_id", args.variant_id);

    if args.unpause {
        put(&mut attributes, "pause", Value::Null);
    } else if let Some(mode) = &args.pause {
        let mut pause = Attributes::new();
        put(&mut pause, "mode", mode.as_str());
        put_some(&mut pause, "resumes_at", args.pause_resumes_at.as_deref());
        put(&mut attributes, "pause", Value::Object(pause));
    }

    if args.cancelled {
        put(&mut attributes, "cancelled", true);
    } else if args.uncancelled {
        put(&mut attributes, "cancelled", false);
    }

    put_some(&mut attributes, "trial_ends_at", args.trial_ends_at.as_deref());
    match args.billing_anchor {
        Some(0) => put(&mut attributes, "billing_anchor", Value::Null),
        Some(day) => put(&mut attributes, "billing_anchor", day),
        None => {}
    }

    if attributes.is_empty() {
        return Err(nothing_to_update(
            "--variant-id, --pause, --unpause, --cancelled, --uncancelled, --trial-ends-at or --billing-anchor",
        ));
    }
    if args.invoice_immediately {
        put(&mut attributes, "invoice_immediately", true);
    }
    if args.disable_prorations {
        put(&mut attributes, "disable_prorations", true);
    }

    Ok(ApiRequest::patch(SUBSCRIPTIONS.item_path(&args.id)).with_body(document(
        SUBSCRIPTIONS.command,
        Some(&args.id),
        attributes,
        Attributes::new(),
    )))
}

pub fn subscription_item_update_request(args: &SubscriptionItemUpdateArgs) -> ApiRequest {
    let mut attributes = Attributes::new();
    put(&mut attributes, "quantity", args.quantity);
    put_some(&mut attributes, "invoice_immediately", args.invoice_immediately);
    put_some(&mut attributes, "disable_prorations", args.disable_prorations);
    ApiRequest::patch(SUBSCRIPTION_ITEMS.item_path(&args.id)).with_body(document(
        SUBSCRIPTION_ITEMS.command,
        Some(&args.id),
        attributes,
        Attributes::new(),
    ))
}

/// Current-period usage of a metered item. The answer carries only `meta`.
pub fn current_usage_request(id: &str) -> ApiRequest {
    ApiRequest::get(format!("{}/current-usage", SUBSCRIPTION_ITEMS.item_path(id)))
}

pub fn usage_record_create_request(args: &UsageRecordCreateArgs) -> ApiRequest {
    let mut attributes = Attributes::new();
    put(&mut attributes, "quantity", args.quantity);
    put(&mut attributes, "action", args.action.as_str());
    let mut relationships = Attributes::new();
    relationships.insert(
        "subscription-item".to_string(),
        to_one(&SUBSCRIPTION_ITEMS, &args.subscription_item_id),
    );
    ApiRequest::post(USAGE_RECORDS.path).with_body(document(
        USAGE_RECORDS.command,
        None,
        attributes,
        relationships,
    ))
}

pub fn customer_create_request(args: &CustomerCreateArgs) -> ApiRequest {
    let mut attributes = Attributes::new();
    put(&mut attributes, "name", args.name.as_str());
    put(&mut attributes, "email", args.email.as_str());
    put_some(&mut attributes, "city", args.city.as_deref());
    put_some(&mut attributes, "region", args.region.as_deref());
    put_some(&mut attributes, "country", args.country.as_deref());
    let mut relationships = Attributes::new();
    relationships.insert("store".to_string(), to_one(&STORES, &args.store_id));
    ApiRequest::post(CUSTOMERS.path).with_body(document(
        CUSTOMERS.command,
        None,
        attributes,
        relationships,
    ))
}

pub fn customer_update_request(args: &CustomerUpdateArgs) -> Result<ApiRequest, LmsqError> {
    let mut attributes = Attributes::new();
    put_some(&mut attributes, "name", args.name.as_deref());
    put_some(&mut attributes, "email", args.email.as_deref());
    put_some(&mut attributes, "city", args.city.as_deref());
    put_some(&mut attributes, "region", args.region.as_deref());
    put_some(&mut attributes, "country", args.country.as_deref());
    if attributes.is_empty() {
        return Err(nothing_to_update("--name, --email, --city, --region or --country"));
    }
    Ok(ApiRequest::patch(CUSTOMERS.item_path(&args.id)).with_body(document(
        CUSTOMERS.command,
        Some(&args.id),
        attributes,
        Attributes::new(),
    )))
}

pub fn discount_create_request(args: &DiscountCreateArgs) -> Result<ApiRequest, LmsqError> {
    let limited_to_products = args.is_limited_to_products == Some(true);
    let variant_ids = match args.variant_ids.as_deref() {
        Some(_) if !limited_to_products => {
            return Err(LmsqError::InvalidArgument(
                "--variant-ids requires --is-limited-to-products true".to_string(),
            ))
        }
        Some(value) => parse_id_list("--variant-ids", value)?,
        None => Vec::new(),
    };

    let mut attributes = Attributes::new();
    put(&mut attributes, "name", args.name.as_str());
    put_some(&mut attributes, "code", args.code.as_deref());
    put(&mut attributes, "amount", args.amount);
    put(&mut attributes, "amount_type", args.amount_type.as_str());
    put_some(&mut attributes, "is_limited_to_products", args.is_limited_to_products);
    put_some(&mut attributes, "is_limited_redemptions", args.is_limited_redemptions);
    put_some(&mut attributes, "max_redemptions", args.max_redemptions);
    put_some(&mut attributes, "starts_at", args.starts_at.as_deref());
    put_some(&mut attributes, "expires_at", args.expires_at.as_deref());
    put_some(&mut attributes, "duration", args.duration.as_deref());
    put_some(&mut attributes, "duration_in_months", args.duration_in_months);
    put_some(&mut attributes, "test_mode", args.test_mode);

    let mut relationships = Attributes::new();
    relationships.insert("store".to_string(), to_one(&STORES, &args.store_id));
    if !variant_ids.is_empty() {
        let data: Vec<Value> = variant_ids
            .iter()
            .map(|id| json!({ "type": VARIANTS.command, "id": id.to_string() }))
            .collect();
        relationships.insert("variants".to_string(), json!({ "data": data }));
    }

    Ok(ApiRequest::post(DISCOUNTS.path).with_body(document(
        DISCOUNTS.command,
        None,
        attributes,
        relationships,
    )))
}

pub fn license_key_update_request(args: &LicenseKeyUpdateArgs) -> Result<ApiRequest, LmsqError> {
    let mut attributes = Attributes::new();
    match args.activation_limit.as_deref() {
        Some("unlimited") => put(&mut attributes, "activation_limit", Value::Null),
        Some(limit) => {
            let limit = limit.parse::<u64>().map_err(|_| {
                LmsqError::InvalidArgument(format!(
                    "--activation-limit expects a number or \"unlimited\", got \"{}\"",
                    limit
                ))
            })?;
            put(&mut attributes, "activation_limit", limit);
        }
        None => {}
    }
    match args.expires_at.as_deref() {
        Some("never") => put(&mut attributes, "expires_at", Value::Null),
        other => put_some(&mut attributes, "expires_at", other),
    }
    let disabled = args.disabled.or(args.enabled.map(|enabled| !enabled));
    put_some(&mut attributes, "disabled", disabled);

    if attributes.is_empty() {
        return Err(nothing_to_update(
            "--activation-limit, --expires-at, --disabled or --enabled",
        ));
    }
    Ok(ApiRequest::patch(LICENSE_KEYS.item_path(&args.id)).with_body(document(
        LICENSE_KEYS.command,
        Some(&args.id),
        attributes,
        Attributes::new(),
    )))
}

pub fn checkout_create_request(args: &CheckoutCreateArgs) -> Result<ApiRequest, LmsqError> {
    let mut product = Attributes::new();
    put_some(&mut product, "name", args.product_name.as_deref());
    put_some(&mut product, "description", args.product_description.as_deref());
    put_some(
        &mut product,
        "media",
        args.product_media.as_deref().map(parse_comma_separated),
    );
    put_some(&mut product, "redirect_url", args.redirect_url.as_deref());
    put_some(&mut product, "receipt_button_text", args.receipt_button_text.as_deref());
    put_some(&mut product, "receipt_link_url", args.receipt_link_url.as_deref());
    put_some(&mut product, "receipt_thank_you_note", args.receipt_thank_you_note.as_deref());
    if let Some(value) = args.enabled_variants.as_deref() {
        put(&mut product, "enabled_variants", parse_id_list("--enabled-variants", value)?);
    }
    put_some(&mut product, "confirmation_title", args.confirmation_title.as_deref());
    put_some(&mut product, "confirmation_message", args.confirmation_message.as_deref());
    put_some(
        &mut product,
        "confirmation_button_text",
        args.confirmation_button_text.as_deref(),
    );

    let mut options = Attributes::new();
    let toggles = [
        ("embed", args.embed, true),
        ("media", args.no_media, false),
        ("logo", args.no_logo, false),
        ("desc", args.no_desc, false),
        ("discount", args.no_discount, false),
        ("skip_trial", args.skip_trial, true),
        ("subscription_preview", args.subscription_preview, true),
    ];
    for (key, given, value) in toggles {
        if given {
            put(&mut options, key, value);
        }
    }
    put_some(&mut options, "background_color", args.background_color.as_deref());
    put_some(&mut options, "button_color", args.button_color.as_deref());

    let mut data = Attributes::new();
    put_some(&mut data, "email", args.email.as_deref());
    put_some(&mut data, "name", args.name.as_deref());
    let mut billing = Attributes::new();
    put_some(&mut billing, "country", args.billing_country.as_deref());
    put_some(&mut billing, "zip", args.billing_zip.as_deref());
    if !billing.is_empty() {
        put(&mut data, "billing_address", Value::Object(billing));
    }
    put_some(&mut data, "tax_number", args.tax_number.as_deref());
    put_some(&mut data, "discount_code", args.discount_code.as_deref());
    if let Some(custom) = args.custom.as_deref() {
        match serde_json::from_str::<Value>(custom) {
            Ok(Value::Object(custom)) => put(&mut data, "custom", Value::Object(custom)),
            _ => {
                return Err(LmsqError::InvalidArgument(
                    "--custom must be a JSON object".to_string(),
                ))
            }
        }
    }

    let mut attributes = Attributes::new();
    put_some(&mut attributes, "custom_price", args.custom_price);
    for (key, section) in [
        ("product_options", product),
        ("checkout_options", options),
        ("checkout_data", data),
    ] {
        if !section.is_empty() {
            put(&mut attributes, key, Value::Object(section));
        }
    }
    if args.preview {
        put(&mut attributes, "preview", true);
    }
    if args.test_mode {
        put(&mut attributes, "test_mode", true);
    }
    put_some(&mut attributes, "expires_at", args.expires_at.as_deref());

    let mut relationships = Attributes::new();
    relationships.insert("store".to_string(), to_one(&STORES, &args.store_id));
    relationships.insert("variant".to_string(), to_one(&VARIANTS, &args.variant_id));

    Ok(ApiRequest::post(CHECKOUTS.path).with_body(document(
        CHECKOUTS.command,
        None,
        attributes,
        relationships,
    )))
}

fn event_list(events: &str) -> Result<Vec<String>, LmsqError> {
    let events = parse_comma_separated(events);
    if events.is_empty() {
        return Err(LmsqError::InvalidArgument(
            "--events needs at least one event name".to_string(),
        ));
    }
    Ok(events)
}

pub fn webhook_create_request(args: &WebhookCreateArgs) -> Result<ApiRequest, LmsqError> {
    let mut attributes = Attributes::new();
    put(&mut attributes, "url", args.url.as_str());
    put(&mut attributes, "events", event_list(&args.events)?);
    put(&mut attributes, "secret", args.secret.as_str());
    if args.test_mode {
        put(&mut attributes, "test_mode", true);
    }
    let mut relationships = Attributes::new();
    relationships.insert("store".to_string(), to_one(&STORES, &args.store_id));
    Ok(ApiRequest::post(WEBHOOKS.path).with_body(document(
        WEBHOOKS.command,
        None,
        attributes,
        relationships,
    )))
}

pub fn webhook_update_request(args: &WebhookUpdateArgs) -> Result<ApiRequest, LmsqError> {
    let mut attributes = Attributes::new();
    put_some(&mut attributes, "url", args.url.as_deref());
    put_some(&mut attributes, "secret", args.secret.as_deref());
    if let Some(events) = args.events.as_deref() {
        put(&mut attributes, "events", event_list(events)?);
    }
    if attributes.is_empty() {
        return Err(nothing_to_update("--url, --secret or --events"));
    }
    Ok(ApiRequest::patch(WEBHOOKS.item_path(&args.id)).with_body(document(
        WEBHOOKS.command,
        Some(&args.id),
        attributes,
        Attributes::new(),
    )))
}

/// License API call plus the member of the answer that reports the outcome.
pub fn license_request(command: &LicenseCommand) -> (ApiRequest, &'static str) {
    match command {
        LicenseCommand::Activate {
            key, instance_name, ..
        } => (
            ApiRequest::post("/licenses/activate")
                .with_form("license_key", key.as_str())
                .with_form("instance_name", instance_name.as_str()),
            "activated",
        ),
        LicenseCommand::Validate {
            key, instance_id, ..
        } => {
            let request = ApiRequest::post("/licenses/validate").with_form("license_key", key.as_str());
            let request = match instance_id {
                Some(id) => request.with_form("instance_id", id.as_str()),
                None => request,
            };
            (request, "valid")
        }
        LicenseCommand::Deactivate {
            key, instance_id, ..
        } => (
            ApiRequest::post("/licenses/deactivate")
                .with_form("license_key", key.as_str())
                .with_form("instance_id", instance_id.as_str()),
            "deactivated",
        ),
    }
}
