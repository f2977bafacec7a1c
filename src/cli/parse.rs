//! CLI parse: clap types for lmsq. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// lmsq - Lemon Squeezy from the command line
#[derive(Parser, Debug)]
#[command(name = "lmsq", version)]
#[command(about = "Query and manage a Lemon Squeezy store from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub output: OutputArgs,

    /// API key (overrides LEMONSQUEEZY_API_KEY and the stored key)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Configuration file path (default: $XDG_CONFIG_HOME/lmsq/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

/// Flags shared by every command that prints a resource.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output as JSON (flattened)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Output the raw JSON:API response
    #[arg(long, global = true)]
    pub json_raw: bool,

    /// Comma-separated attributes to show (id is always included)
    #[arg(short = 'f', long, global = true, value_name = "FIELDS")]
    pub fields: Option<String>,

    /// Force colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stores
    Stores {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Customers (list, get, create, update, archive)
    Customers {
        #[command(subcommand)]
        command: CustomerCommand,
    },
    /// Products
    Products {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Product variants
    Variants {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Variant prices
    Prices {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Variant files
    Files {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Orders (list, get, invoice, refund)
    Orders {
        #[command(subcommand)]
        command: OrderCommand,
    },
    /// Order items
    OrderItems {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Subscriptions (list, get, update, cancel)
    Subscriptions {
        #[command(subcommand)]
        command: SubscriptionCommand,
    },
    /// Subscription invoices (list, get, generate, refund)
    SubscriptionInvoices {
        #[command(subcommand)]
        command: SubscriptionInvoiceCommand,
    },
    /// Subscription items (list, get, update, usage)
    SubscriptionItems {
        #[command(subcommand)]
        command: SubscriptionItemCommand,
    },
    /// Usage records (list, get, create)
    UsageRecords {
        #[command(subcommand)]
        command: UsageRecordCommand,
    },
    /// Discounts (list, get, create, delete)
    Discounts {
        #[command(subcommand)]
        command: DiscountCommand,
    },
    /// Discount redemptions
    DiscountRedemptions {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// License keys (list, get, update)
    LicenseKeys {
        #[command(subcommand)]
        command: LicenseKeyCommand,
    },
    /// License key instances
    LicenseKeyInstances {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Checkouts (list, get, create)
    Checkouts {
        #[command(subcommand)]
        command: CheckoutCommand,
    },
    /// Webhooks (list, get, create, update, delete)
    Webhooks {
        #[command(subcommand)]
        command: WebhookCommand,
    },
    /// Affiliates
    Affiliates {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Activate, validate and deactivate license keys (public License API, no API key needed)
    Licenses {
        #[command(subcommand)]
        command: LicenseCommand,
    },
    /// Show the authenticated user
    User(UserArgs),
    /// Manage the stored API key
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

/// List and get, available on every resource.
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceCommand {
    /// List resources (paginated)
    List(ListArgs),
    /// Get a single resource by ID
    Get(GetArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum OrderCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Generate a PDF invoice for an order and print its download link
    Invoice(InvoiceArgs),
    /// Refund an order (full refund unless --amount is given)
    Refund(RefundArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubscriptionInvoiceCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Generate a PDF for a subscription invoice and print its download link
    Generate(InvoiceArgs),
    /// Refund a subscription invoice (full refund unless --amount is given)
    Refund(RefundArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubscriptionCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Change plan, pause or resume, schedule or undo cancellation, adjust billing
    Update(SubscriptionUpdateArgs),
    /// Cancel a subscription immediately (see `update --cancelled` for period end)
    Cancel(ActionArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubscriptionItemCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Change the quantity of a subscription item
    Update(SubscriptionItemUpdateArgs),
    /// Current-period usage of a metered subscription item
    Usage(ActionArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum UsageRecordCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Record usage for a metered subscription item
    Create(UsageRecordCreateArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum LicenseKeyCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Change a license key's activation limit, expiry or disabled state
    Update(LicenseKeyUpdateArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum CheckoutCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Create a checkout URL for a variant
    Create(CheckoutCreateArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum CustomerCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Create a customer in a store
    Create(CustomerCreateArgs),
    /// Update a customer
    Update(CustomerUpdateArgs),
    /// Archive a customer
    Archive(ActionArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum DiscountCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Create a discount
    Create(DiscountCreateArgs),
    /// Delete a discount
    Delete(ActionArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub enum WebhookCommand {
    #[command(flatten)]
    Common(ResourceCommand),
    /// Create a webhook
    Create(WebhookCreateArgs),
    /// Change a webhook's URL, secret or events
    Update(WebhookUpdateArgs),
    /// Delete a webhook
    Delete(ActionArgs),
}

/// License API commands. These post form data and need no API key.
#[derive(Subcommand, Debug, Clone)]
pub enum LicenseCommand {
    /// Activate a license key for a new instance
    Activate {
        /// License key
        #[arg(long)]
        key: String,
        /// Label for the new instance
        #[arg(long)]
        instance_name: String,
        /// Print the raw value of one field of the result
        #[arg(long, value_name = "FIELD")]
        pluck: Option<String>,
    },
    /// Validate a license key, or one of its instances
    Validate {
        /// License key
        #[arg(long)]
        key: String,
        /// Instance to validate (the key itself when omitted)
        #[arg(long)]
        instance_id: Option<String>,
        /// Print the raw value of one field of the result
        #[arg(long, value_name = "FIELD")]
        pluck: Option<String>,
    },
    /// Deactivate a license key instance
    Deactivate {
        /// License key
        #[arg(long)]
        key: String,
        /// Instance to deactivate
        #[arg(long)]
        instance_id: String,
        /// Print the raw value of one field of the result
        #[arg(long, value_name = "FIELD")]
        pluck: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Validate an API key and store it in the config file
    Login {
        /// API key (prompted for when omitted)
        #[arg(short = 'k', long)]
        key: Option<String>,
    },
    /// Remove the stored API key
    Logout,
    /// Show where the active API key comes from and who it belongs to
    Status,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page number
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: Option<u64>,

    /// Results per page (1-100, default 5)
    #[arg(short = 's', long, value_parser = clap::value_parser!(u64).range(1..=100))]
    pub page_size: Option<u64>,

    /// Comma-separated related resources to include
    #[arg(short = 'i', long)]
    pub include: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print only the IDs
    #[arg(long)]
    pub only_ids: bool,

    /// Print only the total count
    #[arg(long)]
    pub count: bool,

    /// Fetch only the first result
    #[arg(long)]
    pub first: bool,
}

/// List filters. Each resource accepts a subset; the rest are rejected.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Filter by store ID
    #[arg(long)]
    pub store_id: Option<String>,
    /// Filter by customer email
    #[arg(long)]
    pub email: Option<String>,
    /// Filter by user email
    #[arg(long)]
    pub user_email: Option<String>,
    /// Filter by order number
    #[arg(long)]
    pub order_number: Option<String>,
    /// Filter by order ID
    #[arg(long)]
    pub order_id: Option<String>,
    /// Filter by order item ID
    #[arg(long)]
    pub order_item_id: Option<String>,
    /// Filter by product ID
    #[arg(long)]
    pub product_id: Option<String>,
    /// Filter by variant ID
    #[arg(long)]
    pub variant_id: Option<String>,
    /// Filter by price ID
    #[arg(long)]
    pub price_id: Option<String>,
    /// Filter by discount ID
    #[arg(long)]
    pub discount_id: Option<String>,
    /// Filter by license key ID
    #[arg(long)]
    pub license_key_id: Option<String>,
    /// Filter by subscription ID
    #[arg(long)]
    pub subscription_id: Option<String>,
    /// Filter by subscription item ID
    #[arg(long)]
    pub subscription_item_id: Option<String>,
    /// Filter by status
    #[arg(long)]
    pub status: Option<String>,
    /// Filter by refund state (true or false)
    #[arg(long)]
    pub refunded: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GetArgs {
    /// Resource ID
    pub id: String,

    /// Comma-separated related resources to include
    #[arg(short = 'i', long)]
    pub include: Option<String>,

    /// Print the raw value of one attribute
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ActionArgs {
    /// Resource ID
    pub id: String,

    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RefundArgs {
    /// Resource ID
    pub id: String,

    /// Amount to refund in cents (full refund when omitted)
    #[arg(long, value_name = "CENTS", value_parser = clap::value_parser!(u64).range(1..))]
    pub amount: Option<u64>,

    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

/// Billing details printed on a generated invoice.
#[derive(Args, Debug, Clone, Default)]
pub struct InvoiceArgs {
    /// Resource ID
    pub id: String,
    /// Customer name
    #[arg(long)]
    pub name: Option<String>,
    /// Street address
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// State or region
    #[arg(long)]
    pub state: Option<String>,
    /// ZIP or postal code
    #[arg(long)]
    pub zip_code: Option<String>,
    /// Two-letter ISO country code
    #[arg(long)]
    pub country: Option<String>,
    /// Notes appended to the invoice
    #[arg(long)]
    pub notes: Option<String>,
    /// Invoice language (e.g. fr)
    #[arg(long)]
    pub locale: Option<String>,
    /// Print the raw value of one field of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubscriptionUpdateArgs {
    /// Subscription ID
    pub id: String,
    /// Switch to another variant
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub variant_id: Option<u64>,
    /// Pause billing: "void" (customer loses access) or "free" (keeps access)
    #[arg(long, value_parser = ["void", "free"], conflicts_with = "unpause")]
    pub pause: Option<String>,
    /// ISO 8601 datetime at which a paused subscription resumes
    #[arg(long, requires = "pause")]
    pub pause_resumes_at: Option<String>,
    /// Resume a paused subscription
    #[arg(long)]
    pub unpause: bool,
    /// Cancel at the end of the current billing period
    #[arg(long, conflicts_with = "uncancelled")]
    pub cancelled: bool,
    /// Undo a pending cancellation
    #[arg(long)]
    pub uncancelled: bool,
    /// ISO 8601 datetime at which the trial ends
    #[arg(long)]
    pub trial_ends_at: Option<String>,
    /// Day of the month to bill on (1-31); 0 removes the anchor
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=31))]
    pub billing_anchor: Option<u8>,
    /// Invoice immediately when changing plan
    #[arg(long)]
    pub invoice_immediately: bool,
    /// No prorated charges or credits when changing plan
    #[arg(long)]
    pub disable_prorations: bool,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubscriptionItemUpdateArgs {
    /// Subscription item ID
    pub id: String,
    /// New quantity
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub quantity: u64,
    /// Invoice immediately (true/false)
    #[arg(long)]
    pub invoice_immediately: Option<bool>,
    /// Disable prorations (true/false)
    #[arg(long)]
    pub disable_prorations: Option<bool>,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UsageRecordCreateArgs {
    /// Subscription item the usage belongs to
    #[arg(long)]
    pub subscription_item_id: String,
    /// Usage quantity
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub quantity: u64,
    /// "increment" adds to the current usage, "set" replaces it
    #[arg(long, value_parser = ["increment", "set"], default_value = "increment")]
    pub action: String,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CustomerCreateArgs {
    /// Store to create the customer in
    #[arg(long)]
    pub store_id: String,
    /// Full name
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub city: Option<String>,
    /// Two-letter ISO country code
    #[arg(long)]
    pub country: Option<String>,
    /// State or region
    #[arg(long)]
    pub region: Option<String>,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CustomerUpdateArgs {
    /// Customer ID
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DiscountCreateArgs {
    /// Store to create the discount in
    #[arg(long)]
    pub store_id: String,
    #[arg(long)]
    pub name: String,
    /// Percentage, or a fixed amount in cents
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub amount: u64,
    #[arg(long, value_parser = ["percent", "fixed"])]
    pub amount_type: String,
    /// Code customers enter at checkout
    #[arg(long)]
    pub code: Option<String>,
    /// Limit the total number of redemptions (true/false)
    #[arg(long)]
    pub is_limited_redemptions: Option<bool>,
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub max_redemptions: Option<u64>,
    /// ISO 8601 start datetime
    #[arg(long)]
    pub starts_at: Option<String>,
    /// ISO 8601 expiry datetime
    #[arg(long)]
    pub expires_at: Option<String>,
    /// Subscription duration: once, repeating or forever
    #[arg(long, value_parser = ["once", "repeating", "forever"])]
    pub duration: Option<String>,
    /// Months a repeating discount applies for
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub duration_in_months: Option<u64>,
    /// Only apply to the variants given with --variant-ids (true/false)
    #[arg(long)]
    pub is_limited_to_products: Option<bool>,
    /// Comma-separated variant IDs
    #[arg(long)]
    pub variant_ids: Option<String>,
    /// Test mode discount (true/false)
    #[arg(long)]
    pub test_mode: Option<bool>,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LicenseKeyUpdateArgs {
    /// License key ID
    pub id: String,
    /// Maximum activations, or "unlimited"
    #[arg(long)]
    pub activation_limit: Option<String>,
    /// ISO 8601 expiry datetime, or "never"
    #[arg(long)]
    pub expires_at: Option<String>,
    /// Disable the key (true/false)
    #[arg(long, conflicts_with = "enabled")]
    pub disabled: Option<bool>,
    /// Enable the key (true sets disabled=false)
    #[arg(long)]
    pub enabled: Option<bool>,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckoutCreateArgs {
    #[arg(long)]
    pub store_id: String,
    #[arg(long)]
    pub variant_id: String,
    /// Price in cents, overriding the variant's
    #[arg(long, value_parser = clap::value_parser!(u64))]
    pub custom_price: Option<u64>,

    /// Product name shown at checkout
    #[arg(long)]
    pub product_name: Option<String>,
    #[arg(long)]
    pub product_description: Option<String>,
    /// Comma-separated image URLs
    #[arg(long)]
    pub product_media: Option<String>,
    /// Where to send the customer after purchase
    #[arg(long)]
    pub redirect_url: Option<String>,
    #[arg(long)]
    pub receipt_button_text: Option<String>,
    #[arg(long)]
    pub receipt_link_url: Option<String>,
    #[arg(long)]
    pub receipt_thank_you_note: Option<String>,
    /// Comma-separated variant IDs offered at checkout
    #[arg(long)]
    pub enabled_variants: Option<String>,
    #[arg(long)]
    pub confirmation_title: Option<String>,
    #[arg(long)]
    pub confirmation_message: Option<String>,
    #[arg(long)]
    pub confirmation_button_text: Option<String>,

    /// Show the checkout as an overlay
    #[arg(long)]
    pub embed: bool,
    /// Hide product media
    #[arg(long)]
    pub no_media: bool,
    /// Hide the store logo
    #[arg(long)]
    pub no_logo: bool,
    /// Hide the product description
    #[arg(long)]
    pub no_desc: bool,
    /// Hide the discount code field
    #[arg(long)]
    pub no_discount: bool,
    /// Remove the free trial
    #[arg(long)]
    pub skip_trial: bool,
    /// Show the subscription preview text
    #[arg(long)]
    pub subscription_preview: bool,
    /// Hex color of the checkout background
    #[arg(long)]
    pub background_color: Option<String>,
    /// Hex color of the checkout button
    #[arg(long)]
    pub button_color: Option<String>,

    /// Pre-filled email
    #[arg(long)]
    pub email: Option<String>,
    /// Pre-filled name
    #[arg(long)]
    pub name: Option<String>,
    /// Pre-filled billing country (ISO 3166-1 alpha-2)
    #[arg(long)]
    pub billing_country: Option<String>,
    #[arg(long)]
    pub billing_zip: Option<String>,
    #[arg(long)]
    pub tax_number: Option<String>,
    #[arg(long)]
    pub discount_code: Option<String>,
    /// Custom data as a JSON object
    #[arg(long, value_name = "JSON")]
    pub custom: Option<String>,

    /// Include a pricing preview
    #[arg(long)]
    pub preview: bool,
    #[arg(long)]
    pub test_mode: bool,
    /// ISO 8601 expiry datetime
    #[arg(long)]
    pub expires_at: Option<String>,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WebhookCreateArgs {
    #[arg(long)]
    pub store_id: String,
    /// Endpoint URL
    #[arg(long)]
    pub url: String,
    /// Signing secret
    #[arg(long)]
    pub secret: String,
    /// Comma-separated event names (e.g. order_created,subscription_created)
    #[arg(long)]
    pub events: String,
    #[arg(long)]
    pub test_mode: bool,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WebhookUpdateArgs {
    /// Webhook ID
    pub id: String,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub secret: Option<String>,
    /// Comma-separated event names
    #[arg(long)]
    pub events: Option<String>,
    /// Print the raw value of one attribute of the result
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UserArgs {
    /// Print the raw value of one attribute
    #[arg(long, value_name = "FIELD")]
    pub pluck: Option<String>,
}
