//! CLI route: single route table and run context. Dispatches to the API and presentation.

use crate::api::{ApiRequest, HttpTransport, Transport};
use crate::config::{mask_key, ConfigLoader, LmsqConfig, LoadedConfig};
use crate::error::LmsqError;
use crate::output::{
    flatten_meta, flatten_resource, output_list, output_record, output_resource, OutputMode,
    OutputOptions,
};
use crate::resources::{
    ResourceSpec, AFFILIATES, CHECKOUTS, CUSTOMERS, DISCOUNTS, DISCOUNT_REDEMPTIONS, FILES,
    LICENSE_KEYS, LICENSE_KEY_INSTANCES, ORDERS, ORDER_ITEMS, PRICES, PRODUCTS, STORES,
    SUBSCRIPTIONS, SUBSCRIPTION_INVOICES, SUBSCRIPTION_ITEMS, USAGE_RECORDS, USER, VARIANTS,
    WEBHOOKS,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::cli::command_name;
use crate::cli::params::{get_request, list_request};
use crate::cli::parse::{
    ActionArgs, AuthCommand, CheckoutCommand, Commands, CustomerCommand, DiscountCommand, GetArgs,
    InvoiceArgs, LicenseCommand, LicenseKeyCommand, ListArgs, OrderCommand, RefundArgs,
    ResourceCommand, SubscriptionCommand, SubscriptionInvoiceCommand, SubscriptionItemCommand,
    UsageRecordCommand, UserArgs, WebhookCommand,
};
use crate::cli::presentation::{
    format_action_result, format_auth_status, format_license_result, format_login_result,
    format_logout_result, format_meta_result, AuthStatus,
};
use crate::cli::requests::{
    checkout_create_request, current_usage_request, customer_create_request,
    customer_update_request, discount_create_request, invoice_request, license_key_update_request,
    license_request, subscription_item_update_request, subscription_update_request,
    usage_record_create_request, webhook_create_request, webhook_update_request,
};

/// Runtime context for CLI execution: loaded config, credentials, and output settings.
pub struct RunContext {
    loaded: LoadedConfig,
    api_key: Option<String>,
    output: OutputOptions,
    mode: OutputMode,
    transport: Option<Arc<dyn Transport>>,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(
        config_path: Option<PathBuf>,
        api_key: Option<String>,
        output: OutputOptions,
        mode: OutputMode,
    ) -> Result<Self, LmsqError> {
        let loaded = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_loaded(loaded, api_key, output, mode))
    }

    pub fn from_loaded(
        loaded: LoadedConfig,
        api_key: Option<String>,
        output: OutputOptions,
        mode: OutputMode,
    ) -> Self {
        Self {
            loaded,
            api_key,
            output,
            mode,
            transport: None,
        }
    }

    /// Send every request through `transport` instead of HTTP.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn config(&self) -> &LmsqConfig {
        &self.loaded.config
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Execute a command and return the text for stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, LmsqError> {
        let started = Instant::now();
        let name = command_name(command);
        debug!(command = %name, mode = %self.mode, "Executing command");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let result = runtime.block_on(self.execute_inner(command));

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => debug!(command = %name, duration_ms, "Command finished"),
            Err(e) => debug!(command = %name, duration_ms, error = %e, "Command failed"),
        }
        result
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, LmsqError> {
        match command {
            Commands::Stores { command } => self.handle_resource_command(&STORES, command).await,
            Commands::Customers { command } => match command {
                CustomerCommand::Common(common) => {
                    self.handle_resource_command(&CUSTOMERS, common).await
                }
                CustomerCommand::Create(args) => {
                    let message = format!("Customer {} created.", args.name);
                    self.run_action(&CUSTOMERS, customer_create_request(args), &args.pluck, &message)
                        .await
                }
                CustomerCommand::Update(args) => {
                    let message = format!("Customer {} updated.", args.id);
                    self.run_action(&CUSTOMERS, customer_update_request(args)?, &args.pluck, &message)
                        .await
                }
                CustomerCommand::Archive(args) => self.handle_archive(args).await,
            },
            Commands::Products { command } => {
                self.handle_resource_command(&PRODUCTS, command).await
            }
            Commands::Variants { command } => {
                self.handle_resource_command(&VARIANTS, command).await
            }
            Commands::Prices { command } => self.handle_resource_command(&PRICES, command).await,
            Commands::Files { command } => self.handle_resource_command(&FILES, command).await,
            Commands::Orders { command } => match command {
                OrderCommand::Common(common) => self.handle_resource_command(&ORDERS, common).await,
                OrderCommand::Invoice(args) => self.handle_invoice(&ORDERS, args).await,
                OrderCommand::Refund(args) => self.handle_refund(&ORDERS, args).await,
            },
            Commands::OrderItems { command } => {
                self.handle_resource_command(&ORDER_ITEMS, command).await
            }
            Commands::Subscriptions { command } => match command {
                SubscriptionCommand::Common(common) => {
                    self.handle_resource_command(&SUBSCRIPTIONS, common).await
                }
                SubscriptionCommand::Update(args) => {
                    let request = subscription_update_request(args)?;
                    let message = format!("Subscription {} updated.", args.id);
                    self.run_action(&SUBSCRIPTIONS, request, &args.pluck, &message)
                        .await
                }
                SubscriptionCommand::Cancel(args) => self.handle_cancel(args).await,
            },
            Commands::SubscriptionInvoices { command } => match command {
                SubscriptionInvoiceCommand::Common(common) => {
                    self.handle_resource_command(&SUBSCRIPTION_INVOICES, common)
                        .await
                }
                SubscriptionInvoiceCommand::Generate(args) => {
                    self.handle_invoice(&SUBSCRIPTION_INVOICES, args).await
                }
                SubscriptionInvoiceCommand::Refund(args) => {
                    self.handle_refund(&SUBSCRIPTION_INVOICES, args).await
                }
            },
            Commands::SubscriptionItems { command } => match command {
                SubscriptionItemCommand::Common(common) => {
                    self.handle_resource_command(&SUBSCRIPTION_ITEMS, common)
                        .await
                }
                SubscriptionItemCommand::Update(args) => {
                    let message = format!("Subscription item {} updated.", args.id);
                    let request = subscription_item_update_request(args);
                    self.run_action(&SUBSCRIPTION_ITEMS, request, &args.pluck, &message)
                        .await
                }
                SubscriptionItemCommand::Usage(args) => self.handle_current_usage(args).await,
            },
            Commands::UsageRecords { command } => match command {
                UsageRecordCommand::Common(common) => {
                    self.handle_resource_command(&USAGE_RECORDS, common).await
                }
                UsageRecordCommand::Create(args) => {
                    let request = usage_record_create_request(args);
                    self.run_action(&USAGE_RECORDS, request, &args.pluck, "Usage record created.")
                        .await
                }
            },
            Commands::Discounts { command } => match command {
                DiscountCommand::Common(common) => {
                    self.handle_resource_command(&DISCOUNTS, common).await
                }
                DiscountCommand::Create(args) => {
                    let request = discount_create_request(args)?;
                    let message = format!("Discount {} created.", args.name);
                    self.run_action(&DISCOUNTS, request, &args.pluck, &message)
                        .await
                }
                DiscountCommand::Delete(args) => self.handle_delete(&DISCOUNTS, args).await,
            },
            Commands::DiscountRedemptions { command } => {
                self.handle_resource_command(&DISCOUNT_REDEMPTIONS, command)
                    .await
            }
            Commands::LicenseKeys { command } => match command {
                LicenseKeyCommand::Common(common) => {
                    self.handle_resource_command(&LICENSE_KEYS, common).await
                }
                LicenseKeyCommand::Update(args) => {
                    let request = license_key_update_request(args)?;
                    let message = format!("License key {} updated.", args.id);
                    self.run_action(&LICENSE_KEYS, request, &args.pluck, &message)
                        .await
                }
            },
            Commands::LicenseKeyInstances { command } => {
                self.handle_resource_command(&LICENSE_KEY_INSTANCES, command)
                    .await
            }
            Commands::Checkouts { command } => match command {
                CheckoutCommand::Common(common) => {
                    self.handle_resource_command(&CHECKOUTS, common).await
                }
                CheckoutCommand::Create(args) => {
                    let request = checkout_create_request(args)?;
                    self.run_action(&CHECKOUTS, request, &args.pluck, "Checkout created.")
                        .await
                }
            },
            Commands::Webhooks { command } => match command {
                WebhookCommand::Common(common) => {
                    self.handle_resource_command(&WEBHOOKS, common).await
                }
                WebhookCommand::Create(args) => {
                    let request = webhook_create_request(args)?;
                    self.run_action(&WEBHOOKS, request, &args.pluck, "Webhook created.")
                        .await
                }
                WebhookCommand::Update(args) => {
                    let request = webhook_update_request(args)?;
                    let message = format!("Webhook {} updated.", args.id);
                    self.run_action(&WEBHOOKS, request, &args.pluck, &message)
                        .await
                }
                WebhookCommand::Delete(args) => self.handle_delete(&WEBHOOKS, args).await,
            },
            Commands::Affiliates { command } => {
                self.handle_resource_command(&AFFILIATES, command).await
            }
            Commands::Licenses { command } => self.handle_license(command).await,
            Commands::User(args) => self.handle_user(args).await,
            Commands::Auth { command } => self.handle_auth_command(command).await,
        }
    }

    async fn handle_resource_command(
        &self,
        spec: &ResourceSpec,
        command: &ResourceCommand,
    ) -> Result<String, LmsqError> {
        match command {
            ResourceCommand::List(args) => self.handle_list(spec, args).await,
            ResourceCommand::Get(args) => self.handle_get(spec, args).await,
        }
    }

    async fn handle_list(&self, spec: &ResourceSpec, args: &ListArgs) -> Result<String, LmsqError> {
        let request = list_request(spec, args)?;
        let options = OutputOptions {
            only_ids: args.only_ids,
            count: args.count,
            first: args.first,
            ..self.output.clone()
        };
        let envelope = require_body(self.send(request).await?)?;
        output_list(&envelope, self.mode, spec.columns, &options)
    }

    async fn handle_get(&self, spec: &ResourceSpec, args: &GetArgs) -> Result<String, LmsqError> {
        let request = get_request(spec, &args.id, args.include.as_deref())?;
        let envelope = require_body(self.send(request).await?)?;
        output_resource(&envelope, self.mode, spec.label, &self.pluck_options(&args.pluck))
    }

    async fn handle_refund(
        &self,
        spec: &ResourceSpec,
        args: &RefundArgs,
    ) -> Result<String, LmsqError> {
        let path = format!("{}/refund", spec.item_path(&args.id));
        let subject = format!("{} {}", sentence_case(spec.label), args.id);
        let (request, message) = match args.amount {
            None => (ApiRequest::post(path), format!("{} fully refunded.", subject)),
            Some(amount) => (
                ApiRequest::post(path).with_body(json!({
                    "data": {
                        "type": spec.command,
                        "id": args.id,
                        "attributes": { "amount": amount }
                    }
                })),
                format!("{} refunded ({} cents).", subject, amount),
            ),
        };
        info!(resource = spec.command, id = %args.id, amount = ?args.amount, "Issuing refund");
        self.run_action(spec, request, &args.pluck, &message).await
    }

    /// Generated invoices answer with `meta.urls.download_invoice_url` and no `data`.
    async fn handle_invoice(
        &self,
        spec: &ResourceSpec,
        args: &InvoiceArgs,
    ) -> Result<String, LmsqError> {
        let request = invoice_request(spec, args);
        let message = format!("Invoice generated for {} {}.", sentence_case(spec.label), args.id);
        let data = self.send(request).await?;
        format_meta_result(
            data.as_ref(),
            self.mode,
            "Invoice",
            &self.pluck_options(&args.pluck),
            &message,
        )
    }

    async fn handle_current_usage(&self, args: &ActionArgs) -> Result<String, LmsqError> {
        let envelope = require_body(self.send(current_usage_request(&args.id)).await?)?;
        let usage = flatten_meta(&envelope)?;
        output_record(
            &envelope,
            usage,
            self.mode,
            "Current Usage",
            &self.pluck_options(&args.pluck),
        )
    }

    /// License API calls need no API key; a configured key is not sent.
    async fn handle_license(&self, command: &LicenseCommand) -> Result<String, LmsqError> {
        let pluck = match command {
            LicenseCommand::Activate { pluck, .. }
            | LicenseCommand::Validate { pluck, .. }
            | LicenseCommand::Deactivate { pluck, .. } => pluck,
        };
        let (request, status_field) = license_request(command);
        let transport: Arc<dyn Transport> = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(HttpTransport::anonymous(Some(&self.loaded.config.base_url))?),
        };
        let body = require_body(transport.send(request).await?.into_result()?)?;
        format_license_result(&body, status_field, self.mode, &self.pluck_options(pluck))
    }

    async fn handle_cancel(&self, args: &ActionArgs) -> Result<String, LmsqError> {
        let request = ApiRequest::delete(SUBSCRIPTIONS.item_path(&args.id));
        let message = format!("Subscription {} cancelled successfully.", args.id);
        self.run_action(&SUBSCRIPTIONS, request, &args.pluck, &message)
            .await
    }

    async fn handle_archive(&self, args: &ActionArgs) -> Result<String, LmsqError> {
        let request = ApiRequest::patch(CUSTOMERS.item_path(&args.id)).with_body(json!({
            "data": {
                "type": CUSTOMERS.command,
                "id": args.id,
                "attributes": { "status": "archived" }
            }
        }));
        let message = format!("Customer {} archived successfully.", args.id);
        self.run_action(&CUSTOMERS, request, &args.pluck, &message)
            .await
    }

    async fn handle_delete(
        &self,
        spec: &ResourceSpec,
        args: &ActionArgs,
    ) -> Result<String, LmsqError> {
        let request = ApiRequest::delete(spec.item_path(&args.id));
        let message = format!("{} deleted.", spec.label);
        self.run_action(spec, request, &args.pluck, &message).await
    }

    async fn run_action(
        &self,
        spec: &ResourceSpec,
        request: ApiRequest,
        pluck: &Option<String>,
        message: &str,
    ) -> Result<String, LmsqError> {
        let data = self.send(request).await?;
        format_action_result(
            data.as_ref(),
            self.mode,
            spec.label,
            &self.pluck_options(pluck),
            message,
        )
    }

    async fn handle_user(&self, args: &UserArgs) -> Result<String, LmsqError> {
        let envelope = require_body(self.send(me_request()).await?)?;
        output_resource(&envelope, self.mode, USER.label, &self.pluck_options(&args.pluck))
    }

    async fn handle_auth_command(&self, command: &AuthCommand) -> Result<String, LmsqError> {
        match command {
            AuthCommand::Login { key } => self.handle_auth_login(key.as_deref()).await,
            AuthCommand::Logout => self.handle_auth_logout(),
            AuthCommand::Status => self.handle_auth_status().await,
        }
    }

    async fn handle_auth_login(&self, key: Option<&str>) -> Result<String, LmsqError> {
        let key = match key {
            Some(key) => key.trim().to_string(),
            None => prompt_api_key()?,
        };
        if key.is_empty() {
            return Err(LmsqError::InvalidArgument("No API key provided".to_string()));
        }

        let transport = self.transport(&key)?;
        let user = transport
            .send(me_request())
            .await?
            .into_result()
            .map_err(|e| match e {
                LmsqError::Api { message, status } => LmsqError::Api {
                    message: format!("Authentication failed: {}", message),
                    status,
                },
                other => other,
            })?;
        let name = user
            .as_ref()
            .and_then(|envelope| envelope.pointer("/data/attributes/name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown user")
            .to_string();

        let path = self.loaded.credentials.save_api_key(&key)?;
        info!(config_path = %path.display(), "Stored API key");
        Ok(format_login_result(&name, &path))
    }

    fn handle_auth_logout(&self) -> Result<String, LmsqError> {
        let removed = self.loaded.credentials.remove_api_key()?;
        let path = self.loaded.credentials.path().ok_or_else(|| {
            LmsqError::Config("cannot locate a config directory; pass --config <path>".to_string())
        })?;
        Ok(format_logout_result(removed, path))
    }

    async fn handle_auth_status(&self) -> Result<String, LmsqError> {
        let credentials = &self.loaded.credentials;
        let Ok(key) = credentials.resolve_api_key(self.api_key.as_deref()) else {
            return format_auth_status(&AuthStatus::unauthenticated(), self.mode);
        };
        let source = credentials.api_key_source(self.api_key.as_deref());
        let mut status = AuthStatus::authenticated(source, mask_key(&key));

        let fetched = match self.transport(&key) {
            Ok(transport) => match transport.send(me_request()).await {
                Ok(response) => response.into_result().and_then(require_body),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        match fetched.and_then(|envelope| flatten_resource(&envelope)) {
            Ok(user) => {
                status.name = user.get("name").and_then(Value::as_str).map(str::to_string);
                status.email = user.get("email").and_then(Value::as_str).map(str::to_string);
            }
            Err(e) => {
                debug!(error = %e, "Could not fetch user info");
                status.user_error = Some(e.to_string());
            }
        }
        format_auth_status(&status, self.mode)
    }

    fn pluck_options(&self, pluck: &Option<String>) -> OutputOptions {
        OutputOptions {
            pluck: pluck.clone(),
            ..self.output.clone()
        }
    }

    fn transport(&self, api_key: &str) -> Result<Arc<dyn Transport>, LmsqError> {
        if let Some(transport) = &self.transport {
            return Ok(Arc::clone(transport));
        }
        let transport = HttpTransport::new(api_key, Some(&self.loaded.config.base_url))?;
        debug!(base_url = transport.base_url(), "Using HTTP transport");
        Ok(Arc::new(transport))
    }

    /// Resolve the key, send, and turn API failures into errors.
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>, LmsqError> {
        let api_key = self
            .loaded
            .credentials
            .resolve_api_key(self.api_key.as_deref())?;
        let transport = self.transport(&api_key)?;
        transport.send(request).await?.into_result()
    }
}

fn me_request() -> ApiRequest {
    ApiRequest::get(USER.item_path("me"))
}

fn require_body(data: Option<Value>) -> Result<Value, LmsqError> {
    data.ok_or_else(|| LmsqError::MalformedResponse("empty response body".to_string()))
}

fn prompt_api_key() -> Result<String, LmsqError> {
    dialoguer::Password::new()
        .with_prompt("Lemon Squeezy API key")
        .interact()
        .map(|key| key.trim().to_string())
        .map_err(|e| {
            LmsqError::InvalidArgument(format!("Failed to read API key ({}); pass --key", e))
        })
}

/// "Subscription Invoice" -> "Subscription invoice".
fn sentence_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
