//! Registry of API resources exposed as commands.

use crate::output::Column;

/// Static description of one resource collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Command name, also the JSON:API type.
    pub command: &'static str,
    /// Collection path relative to the API base URL.
    pub path: &'static str,
    /// Singular label for detail views.
    pub label: &'static str,
    /// Columns shown by the pretty list table, after `ID`.
    pub columns: &'static [Column<'static>],
    /// Accepted `--include` values.
    pub includes: &'static [&'static str],
    /// Accepted `filter[...]` keys.
    pub filters: &'static [&'static str],
}

impl ResourceSpec {
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }

    pub fn accepts_filter(&self, key: &str) -> bool {
        self.filters.contains(&key)
    }
}

const fn col(key: &'static str, label: &'static str) -> Column<'static> {
    Column::new(key, label)
}

pub const STORES: ResourceSpec = ResourceSpec {
    command: "stores",
    path: "/stores",
    label: "Store",
    columns: &[
        col("name", "Name"),
        col("slug", "Slug"),
        col("url", "URL"),
        col("currency", "Currency"),
        col("total_sales", "Total Sales"),
    ],
    includes: &["products", "orders", "subscriptions", "discounts", "license-keys", "webhooks"],
    filters: &[],
};

pub const CUSTOMERS: ResourceSpec = ResourceSpec {
    command: "customers",
    path: "/customers",
    label: "Customer",
    columns: &[
        col("name", "Name"),
        col("email", "Email"),
        col("status", "Status"),
        col("city", "City"),
        col("country", "Country"),
    ],
    includes: &["store", "orders", "subscriptions", "license-keys"],
    filters: &["store_id", "email"],
};

pub const PRODUCTS: ResourceSpec = ResourceSpec {
    command: "products",
    path: "/products",
    label: "Product",
    columns: &[
        col("name", "Name"),
        col("slug", "Slug"),
        col("status", "Status"),
        col("price_formatted", "Price"),
    ],
    includes: &["store", "variants"],
    filters: &["store_id"],
};

pub const VARIANTS: ResourceSpec = ResourceSpec {
    command: "variants",
    path: "/variants",
    label: "Variant",
    columns: &[
        col("name", "Name"),
        col("slug", "Slug"),
        col("status", "Status"),
        col("sort", "Sort"),
    ],
    includes: &["product", "files", "price-model"],
    filters: &["product_id", "status"],
};

pub const PRICES: ResourceSpec = ResourceSpec {
    command: "prices",
    path: "/prices",
    label: "Price",
    columns: &[
        col("variant_id", "Variant ID"),
        col("category", "Category"),
        col("scheme", "Scheme"),
        col("unit_price", "Unit Price"),
    ],
    includes: &["variant"],
    filters: &["variant_id"],
};

pub const FILES: ResourceSpec = ResourceSpec {
    command: "files",
    path: "/files",
    label: "File",
    columns: &[
        col("name", "Name"),
        col("extension", "Extension"),
        col("size_formatted", "Size"),
        col("version", "Version"),
        col("status", "Status"),
    ],
    includes: &["variant"],
    filters: &["variant_id"],
};

pub const ORDERS: ResourceSpec = ResourceSpec {
    command: "orders",
    path: "/orders",
    label: "Order",
    columns: &[
        col("order_number", "Order #"),
        // Wide enough for `partial_refund` so pages line up.
        Column::fixed("status", "Status", 14),
        col("user_email", "Email"),
        col("total", "Total"),
        col("currency", "Currency"),
    ],
    includes: &[
        "store",
        "customer",
        "order-items",
        "subscriptions",
        "license-keys",
        "discount-redemptions",
    ],
    filters: &["store_id", "user_email", "order_number"],
};

pub const ORDER_ITEMS: ResourceSpec = ResourceSpec {
    command: "order-items",
    path: "/order-items",
    label: "Order Item",
    columns: &[
        col("order_id", "Order ID"),
        col("product_name", "Product"),
        col("variant_name", "Variant"),
        col("price", "Price"),
        col("quantity", "Qty"),
    ],
    includes: &["order", "product", "variant"],
    filters: &["order_id", "product_id", "variant_id"],
};

pub const SUBSCRIPTIONS: ResourceSpec = ResourceSpec {
    command: "subscriptions",
    path: "/subscriptions",
    label: "Subscription",
    columns: &[
        col("product_name", "Product"),
        col("variant_name", "Variant"),
        col("status", "Status"),
        col("user_email", "Email"),
        col("renews_at", "Renews At"),
    ],
    includes: &[
        "store",
        "customer",
        "order",
        "order-item",
        "product",
        "variant",
        "subscription-items",
        "subscription-invoices",
    ],
    filters: &[
        "store_id",
        "order_id",
        "order_item_id",
        "product_id",
        "variant_id",
        "user_email",
        "status",
    ],
};

pub const SUBSCRIPTION_INVOICES: ResourceSpec = ResourceSpec {
    command: "subscription-invoices",
    path: "/subscription-invoices",
    label: "Subscription Invoice",
    columns: &[
        col("subscription_id", "Subscription ID"),
        col("billing_reason", "Billing Reason"),
        col("status", "Status"),
        col("total", "Total"),
        col("currency", "Currency"),
    ],
    includes: &["store", "subscription", "customer"],
    filters: &["store_id", "status", "refunded", "subscription_id"],
};

pub const SUBSCRIPTION_ITEMS: ResourceSpec = ResourceSpec {
    command: "subscription-items",
    path: "/subscription-items",
    label: "Subscription Item",
    columns: &[
        col("subscription_id", "Subscription ID"),
        col("price_id", "Price ID"),
        col("quantity", "Quantity"),
        col("is_usage_based", "Usage Based"),
    ],
    includes: &["subscription", "price", "usage-records"],
    filters: &["subscription_id", "price_id"],
};

pub const USAGE_RECORDS: ResourceSpec = ResourceSpec {
    command: "usage-records",
    path: "/usage-records",
    label: "Usage Record",
    columns: &[
        col("subscription_item_id", "Subscription Item ID"),
        col("quantity", "Quantity"),
        col("action", "Action"),
    ],
    includes: &["subscription-item"],
    filters: &["subscription_item_id"],
};

pub const DISCOUNTS: ResourceSpec = ResourceSpec {
    command: "discounts",
    path: "/discounts",
    label: "Discount",
    columns: &[
        col("name", "Name"),
        col("code", "Code"),
        col("amount", "Amount"),
        col("amount_type", "Amount Type"),
        col("status", "Status"),
    ],
    includes: &["store", "variants", "discount-redemptions"],
    filters: &["store_id"],
};

pub const DISCOUNT_REDEMPTIONS: ResourceSpec = ResourceSpec {
    command: "discount-redemptions",
    path: "/discount-redemptions",
    label: "Discount Redemption",
    columns: &[
        col("discount_name", "Discount Name"),
        col("discount_code", "Discount Code"),
        col("amount", "Amount"),
        col("discount_amount_type", "Amount Type"),
    ],
    includes: &["discount", "order"],
    filters: &["discount_id", "order_id"],
};

pub const LICENSE_KEYS: ResourceSpec = ResourceSpec {
    command: "license-keys",
    path: "/license-keys",
    label: "License Key",
    columns: &[
        col("key_short", "Key (Short)"),
        col("status", "Status"),
        col("activation_limit", "Activation Limit"),
        col("instances_count", "Instances"),
        col("expires_at", "Expires At"),
    ],
    includes: &[
        "store",
        "customer",
        "order",
        "order-item",
        "product",
        "license-key-instances",
    ],
    filters: &["store_id", "order_id", "order_item_id", "product_id", "status"],
};

pub const LICENSE_KEY_INSTANCES: ResourceSpec = ResourceSpec {
    command: "license-key-instances",
    path: "/license-key-instances",
    label: "License Key Instance",
    columns: &[
        col("license_key_id", "License Key ID"),
        col("identifier", "Identifier"),
        col("name", "Name"),
    ],
    includes: &["license-key"],
    filters: &["license_key_id"],
};

pub const CHECKOUTS: ResourceSpec = ResourceSpec {
    command: "checkouts",
    path: "/checkouts",
    label: "Checkout",
    columns: &[
        col("url", "URL"),
        col("store_id", "Store ID"),
        col("variant_id", "Variant ID"),
        col("created_at", "Created At"),
    ],
    includes: &["store", "variant"],
    filters: &["store_id", "variant_id"],
};

pub const WEBHOOKS: ResourceSpec = ResourceSpec {
    command: "webhooks",
    path: "/webhooks",
    label: "Webhook",
    columns: &[
        col("url", "URL"),
        col("events", "Events"),
        col("last_sent_at", "Last Sent At"),
    ],
    includes: &["store"],
    filters: &["store_id"],
};

pub const AFFILIATES: ResourceSpec = ResourceSpec {
    command: "affiliates",
    path: "/affiliates",
    label: "Affiliate",
    columns: &[
        col("user_name", "User Name"),
        col("user_email", "User Email"),
        col("status", "Status"),
        col("total_earnings", "Total Earnings"),
    ],
    includes: &[],
    filters: &["store_id", "user_email"],
};

/// The authenticated user. Fetched with `GET /users/me`; there is no list.
pub const USER: ResourceSpec = ResourceSpec {
    command: "user",
    path: "/users",
    label: "User",
    columns: &[col("name", "Name"), col("email", "Email"), col("color", "Color")],
    includes: &[],
    filters: &[],
};

pub const RESOURCES: &[ResourceSpec] = &[
    STORES,
    CUSTOMERS,
    PRODUCTS,
    VARIANTS,
    PRICES,
    FILES,
    ORDERS,
    ORDER_ITEMS,
    SUBSCRIPTIONS,
    SUBSCRIPTION_INVOICES,
    SUBSCRIPTION_ITEMS,
    USAGE_RECORDS,
    DISCOUNTS,
    DISCOUNT_REDEMPTIONS,
    LICENSE_KEYS,
    LICENSE_KEY_INSTANCES,
    CHECKOUTS,
    WEBHOOKS,
    AFFILIATES,
];

pub fn find(command: &str) -> Option<&'static ResourceSpec> {
    RESOURCES.iter().find(|spec| spec.command == command)
}
