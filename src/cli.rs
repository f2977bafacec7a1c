//! CLI domain: parse, params, route, help, output, and presentation only.
//! A single route table dispatches each command to the API and the output pipeline.

mod help;
mod output;
mod params;
mod parse;
mod presentation;
mod requests;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use params::{
    build_filter, build_include, build_page, output_options, parse_comma_separated, Page,
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
pub use parse::{
    ActionArgs, AuthCommand, CheckoutCommand, Cli, Commands, CustomerCommand, DiscountCommand,
    FilterArgs, GetArgs, InvoiceArgs, LicenseCommand, LicenseKeyCommand, ListArgs, OrderCommand,
    OutputArgs, RefundArgs, ResourceCommand, SubscriptionCommand, SubscriptionInvoiceCommand,
    SubscriptionItemCommand, UsageRecordCommand, UserArgs, WebhookCommand,
};
pub use presentation::{format_auth_status, AuthStatus, NOT_AUTHENTICATED};
pub use route::RunContext;
