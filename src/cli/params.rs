//! CLI params: turn parsed flags into output options and API query parameters.

use crate::api::ApiRequest;
use crate::cli::parse::{FilterArgs, ListArgs, OutputArgs};
use crate::error::LmsqError;
use crate::output::OutputOptions;
use crate::resources::ResourceSpec;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// Page number and size sent as `page[number]` / `page[size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

/// Split a comma-separated flag value, dropping blanks.
pub fn parse_comma_separated(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Output options from the global flags alone.
pub fn output_options(args: &OutputArgs) -> OutputOptions {
    OutputOptions {
        json: args.json,
        json_raw: args.json_raw,
        fields: args
            .fields
            .as_deref()
            .map(parse_comma_separated)
            .filter(|fields| !fields.is_empty()),
        color: args.color,
        no_color: args.no_color,
        ..Default::default()
    }
}

/// Validate `--include` against the resource's relationships.
pub fn build_include(
    include: Option<&str>,
    valid: &[&str],
) -> Result<Option<String>, LmsqError> {
    let Some(include) = include else {
        return Ok(None);
    };
    let requested = parse_comma_separated(include);
    if let Some(bad) = requested.iter().find(|name| !valid.contains(&name.as_str())) {
        return Err(LmsqError::InvalidInclude {
            include: bad.clone(),
            valid: valid.iter().map(|s| s.to_string()).collect(),
        });
    }
    if requested.is_empty() {
        Ok(None)
    } else {
        Ok(Some(requested.join(",")))
    }
}

/// `--first` asks for exactly one item.
pub fn build_page(page: Option<u64>, page_size: Option<u64>, first: bool) -> Page {
    Page {
        number: page.unwrap_or(DEFAULT_PAGE),
        size: if first {
            1
        } else {
            page_size.unwrap_or(DEFAULT_PAGE_SIZE)
        },
    }
}

impl FilterArgs {
    /// Filters that were given, as `(key, value)` in flag order.
    pub fn given(&self) -> Vec<(&'static str, &str)> {
        let all: [(&'static str, &Option<String>); 15] = [
            ("store_id", &self.store_id),
            ("email", &self.email),
            ("user_email", &self.user_email),
            ("order_number", &self.order_number),
            ("order_id", &self.order_id),
            ("order_item_id", &self.order_item_id),
            ("product_id", &self.product_id),
            ("variant_id", &self.variant_id),
            ("price_id", &self.price_id),
            ("discount_id", &self.discount_id),
            ("license_key_id", &self.license_key_id),
            ("subscription_id", &self.subscription_id),
            ("subscription_item_id", &self.subscription_item_id),
            ("status", &self.status),
            ("refunded", &self.refunded),
        ];
        all.into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
            .collect()
    }
}

/// Filters the resource accepts. Anything else is a usage error.
pub fn build_filter<'a>(
    filters: &'a FilterArgs,
    spec: &ResourceSpec,
) -> Result<Vec<(&'static str, &'a str)>, LmsqError> {
    let given = filters.given();
    if let Some((bad, _)) = given.iter().find(|(key, _)| !spec.accepts_filter(key)) {
        return Err(LmsqError::InvalidFilter {
            filter: format!("--{}", bad.replace('_', "-")),
            resource: spec.command.to_string(),
            valid: spec
                .filters
                .iter()
                .map(|key| format!("--{}", key.replace('_', "-")))
                .collect(),
        });
    }
    Ok(given)
}

/// Build the list request for `spec`. Validation happens before anything is sent.
pub fn list_request(spec: &ResourceSpec, args: &ListArgs) -> Result<ApiRequest, LmsqError> {
    let include = build_include(args.include.as_deref(), spec.includes)?;
    let filters = build_filter(&args.filters, spec)?;
    let page = build_page(args.page, args.page_size, args.first);

    let mut request = ApiRequest::get(spec.path);
    for (key, value) in filters {
        request = request.with_query(format!("filter[{}]", key), value);
    }
    request = request
        .with_query("page[number]", page.number.to_string())
        .with_query("page[size]", page.size.to_string());
    if let Some(include) = include {
        request = request.with_query("include", include);
    }
    Ok(request)
}

/// Build the get request for one item of `spec`.
pub fn get_request(
    spec: &ResourceSpec,
    id: &str,
    include: Option<&str>,
) -> Result<ApiRequest, LmsqError> {
    let include = build_include(include, spec.includes)?;
    let mut request = ApiRequest::get(spec.item_path(id));
    if let Some(include) = include {
        request = request.with_query("include", include);
    }
    Ok(request)
}
