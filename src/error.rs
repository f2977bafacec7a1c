//! Error types for the lmsq client.
//!
//! `LmsqError` is what every fallible function in the crate returns. At the process
//! boundary it is classified into a `CliError`, which carries one of four stable kinds
//! and maps onto the exit code contract.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_API_ERROR: i32 = 1;
pub const EXIT_INVALID_USAGE: i32 = 2;
pub const EXIT_AUTH_ERROR: i32 = 3;
pub const EXIT_NETWORK_ERROR: i32 = 4;

/// Errors raised inside the client
#[derive(Debug, Error)]
pub enum LmsqError {
    #[error("Unknown field \"{field}\". Valid fields: {}", .valid.join(", "))]
    UnknownField { field: String, valid: Vec<String> },

    #[error("Invalid include \"{include}\". Valid includes: {}", .valid.join(", "))]
    InvalidInclude { include: String, valid: Vec<String> },

    #[error("Invalid filter \"{filter}\" for {resource}. Valid filters: {}", display_list(.valid))]
    InvalidFilter {
        filter: String,
        resource: String,
        valid: Vec<String>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("No API key configured. Run `lmsq auth login` or set LEMONSQUEEZY_API_KEY.")]
    MissingApiKey,

    #[error("{message}")]
    Api { message: String, status: u16 },

    #[error("{0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

impl From<config::ConfigError> for LmsqError {
    fn from(err: config::ConfigError) -> Self {
        LmsqError::Config(err.to_string())
    }
}

/// The four user-visible error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ApiError,
    AuthError,
    InvalidUsage,
    NetworkError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ApiError => "api_error",
            ErrorKind::AuthError => "auth_error",
            ErrorKind::InvalidUsage => "invalid_usage",
            ErrorKind::NetworkError => "network_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure, ready to be rendered and turned into an exit code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliError {
    pub error: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl CliError {
    pub fn new(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            status: None,
            fields: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }
}

/// Classify any error into a `CliError`.
///
/// Errors raised by this crate are matched on their variant. Anything else (and the
/// variants that wrap foreign failures) goes through [`classify_message`].
pub fn classify_error(err: &(dyn std::error::Error + 'static)) -> CliError {
    let Some(err) = err.downcast_ref::<LmsqError>() else {
        return classify_message(err.to_string());
    };

    match err {
        LmsqError::UnknownField { field, .. } => {
            CliError::new(ErrorKind::InvalidUsage, err.to_string()).with_fields(vec![field.clone()])
        }
        LmsqError::InvalidInclude { include, .. } => {
            CliError::new(ErrorKind::InvalidUsage, err.to_string())
                .with_fields(vec![include.clone()])
        }
        LmsqError::InvalidFilter { filter, .. } => {
            CliError::new(ErrorKind::InvalidUsage, err.to_string())
                .with_fields(vec![filter.clone()])
        }
        LmsqError::InvalidArgument(_) => CliError::new(ErrorKind::InvalidUsage, err.to_string()),
        LmsqError::MissingApiKey => CliError::new(ErrorKind::AuthError, err.to_string()),
        LmsqError::Api { message, status } => {
            CliError::new(ErrorKind::ApiError, message.clone()).with_status(*status)
        }
        LmsqError::MalformedResponse(_) => CliError::new(ErrorKind::ApiError, err.to_string()),
        LmsqError::Network(_)
        | LmsqError::Config(_)
        | LmsqError::Io(_)
        | LmsqError::Json(_) => classify_message(err.to_string()),
    }
}

/// Message-substring classification for failures that carry no structured kind.
///
/// The phrases are matched verbatim: "API key" or "auth" mean an authentication
/// problem, "Unknown field" means local usage, everything else is treated as network.
pub fn classify_message(message: impl Into<String>) -> CliError {
    let message = message.into();
    let kind = if message.contains("API key") || message.contains("auth") {
        ErrorKind::AuthError
    } else if message.contains("Unknown field") {
        ErrorKind::InvalidUsage
    } else {
        ErrorKind::NetworkError
    };
    CliError::new(kind, message)
}

/// Process exit code for a classified error.
pub fn get_exit_code(error: &CliError) -> i32 {
    if error.error == ErrorKind::AuthError || error.status == Some(401) {
        return EXIT_AUTH_ERROR;
    }
    match error.error {
        ErrorKind::NetworkError => EXIT_NETWORK_ERROR,
        ErrorKind::InvalidUsage => EXIT_INVALID_USAGE,
        ErrorKind::ApiError | ErrorKind::AuthError => EXIT_API_ERROR,
    }
}
