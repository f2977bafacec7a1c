//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{
    AuthCommand, CheckoutCommand, Commands, CustomerCommand, DiscountCommand, LicenseCommand,
    LicenseKeyCommand, OrderCommand, ResourceCommand, SubscriptionCommand,
    SubscriptionInvoiceCommand, SubscriptionItemCommand, UsageRecordCommand, WebhookCommand,
};

/// Command name string for log events (e.g. "orders.list", "auth.status").
pub fn command_name(command: &Commands) -> String {
    let (resource, action) = match command {
        Commands::Stores { command } => ("stores", resource_command_name(command)),
        Commands::Customers { command } => ("customers", customer_command_name(command)),
        Commands::Products { command } => ("products", resource_command_name(command)),
        Commands::Variants { command } => ("variants", resource_command_name(command)),
        Commands::Prices { command } => ("prices", resource_command_name(command)),
        Commands::Files { command } => ("files", resource_command_name(command)),
        Commands::Orders { command } => ("orders", order_command_name(command)),
        Commands::OrderItems { command } => ("order-items", resource_command_name(command)),
        Commands::Subscriptions { command } => {
            ("subscriptions", subscription_command_name(command))
        }
        Commands::SubscriptionInvoices { command } => (
            "subscription-invoices",
            subscription_invoice_command_name(command),
        ),
        Commands::SubscriptionItems { command } => {
            ("subscription-items", subscription_item_command_name(command))
        }
        Commands::UsageRecords { command } => {
            ("usage-records", usage_record_command_name(command))
        }
        Commands::Discounts { command } => ("discounts", discount_command_name(command)),
        Commands::DiscountRedemptions { command } => {
            ("discount-redemptions", resource_command_name(command))
        }
        Commands::LicenseKeys { command } => ("license-keys", license_key_command_name(command)),
        Commands::LicenseKeyInstances { command } => {
            ("license-key-instances", resource_command_name(command))
        }
        Commands::Checkouts { command } => ("checkouts", checkout_command_name(command)),
        Commands::Webhooks { command } => ("webhooks", webhook_command_name(command)),
        Commands::Affiliates { command } => ("affiliates", resource_command_name(command)),
        Commands::Licenses { command } => ("licenses", license_command_name(command)),
        Commands::User(_) => return "user".to_string(),
        Commands::Auth { command } => ("auth", auth_command_name(command)),
    };
    format!("{}.{}", resource, action)
}

pub fn resource_command_name(command: &ResourceCommand) -> &'static str {
    match command {
        ResourceCommand::List(_) => "list",
        ResourceCommand::Get(_) => "get",
    }
}

fn order_command_name(command: &OrderCommand) -> &'static str {
    match command {
        OrderCommand::Common(common) => resource_command_name(common),
        OrderCommand::Invoice(_) => "invoice",
        OrderCommand::Refund(_) => "refund",
    }
}

fn subscription_invoice_command_name(command: &SubscriptionInvoiceCommand) -> &'static str {
    match command {
        SubscriptionInvoiceCommand::Common(common) => resource_command_name(common),
        SubscriptionInvoiceCommand::Generate(_) => "generate",
        SubscriptionInvoiceCommand::Refund(_) => "refund",
    }
}

fn subscription_command_name(command: &SubscriptionCommand) -> &'static str {
    match command {
        SubscriptionCommand::Common(common) => resource_command_name(common),
        SubscriptionCommand::Update(_) => "update",
        SubscriptionCommand::Cancel(_) => "cancel",
    }
}

fn subscription_item_command_name(command: &SubscriptionItemCommand) -> &'static str {
    match command {
        SubscriptionItemCommand::Common(common) => resource_command_name(common),
        SubscriptionItemCommand::Update(_) => "update",
        SubscriptionItemCommand::Usage(_) => "usage",
    }
}

fn usage_record_command_name(command: &UsageRecordCommand) -> &'static str {
    match command {
        UsageRecordCommand::Common(common) => resource_command_name(common),
        UsageRecordCommand::Create(_) => "create",
    }
}

fn license_key_command_name(command: &LicenseKeyCommand) -> &'static str {
    match command {
        LicenseKeyCommand::Common(common) => resource_command_name(common),
        LicenseKeyCommand::Update(_) => "update",
    }
}

fn checkout_command_name(command: &CheckoutCommand) -> &'static str {
    match command {
        CheckoutCommand::Common(common) => resource_command_name(common),
        CheckoutCommand::Create(_) => "create",
    }
}

fn license_command_name(command: &LicenseCommand) -> &'static str {
    match command {
        LicenseCommand::Activate { .. } => "activate",
        LicenseCommand::Validate { .. } => "validate",
        LicenseCommand::Deactivate { .. } => "deactivate",
    }
}

fn customer_command_name(command: &CustomerCommand) -> &'static str {
    match command {
        CustomerCommand::Common(common) => resource_command_name(common),
        CustomerCommand::Create(_) => "create",
        CustomerCommand::Update(_) => "update",
        CustomerCommand::Archive(_) => "archive",
    }
}

fn discount_command_name(command: &DiscountCommand) -> &'static str {
    match command {
        DiscountCommand::Common(common) => resource_command_name(common),
        DiscountCommand::Create(_) => "create",
        DiscountCommand::Delete(_) => "delete",
    }
}

fn webhook_command_name(command: &WebhookCommand) -> &'static str {
    match command {
        WebhookCommand::Common(common) => resource_command_name(common),
        WebhookCommand::Create(_) => "create",
        WebhookCommand::Update(_) => "update",
        WebhookCommand::Delete(_) => "delete",
    }
}

pub fn auth_command_name(command: &AuthCommand) -> &'static str {
    match command {
        AuthCommand::Login { .. } => "login",
        AuthCommand::Logout => "logout",
        AuthCommand::Status => "status",
    }
}
