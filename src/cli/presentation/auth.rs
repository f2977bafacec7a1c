//! Auth presentation: login, logout, and status formatters.

use crate::config::ApiKeySource;
use crate::error::LmsqError;
use crate::output::OutputMode;
use comfy_table::Table;
use serde::Serialize;
use std::path::Path;

pub const NOT_AUTHENTICATED: &str = "Not authenticated. Run `lmsq auth login`.";

/// What `auth status` found out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_error: Option<String>,
}

impl AuthStatus {
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn authenticated(source: ApiKeySource, masked_key: String) -> Self {
        Self {
            authenticated: true,
            source: Some(source.to_string()),
            api_key: Some(masked_key),
            ..Default::default()
        }
    }
}

pub fn format_auth_status(status: &AuthStatus, mode: OutputMode) -> Result<String, LmsqError> {
    match mode {
        OutputMode::Json | OutputMode::JsonRaw => Ok(serde_json::to_string_pretty(status)?),
        OutputMode::Pretty => Ok(format_auth_status_table(status)),
        OutputMode::Text => Ok(format_auth_status_text(status)),
    }
}

pub fn format_auth_status_text(status: &AuthStatus) -> String {
    if !status.authenticated {
        return NOT_AUTHENTICATED.to_string();
    }
    let mut lines = vec![
        format!("API key source: {}", status.source.as_deref().unwrap_or("")),
        format!("API key:        {}", status.api_key.as_deref().unwrap_or("")),
    ];
    if let Some(name) = &status.name {
        lines.push(format!("Name:           {}", name));
    }
    if let Some(email) = &status.email {
        lines.push(format!("Email:          {}", email));
    }
    if let Some(err) = &status.user_error {
        lines.push(format!("Could not fetch user info: {}", err));
    }
    lines.join("\n")
}

fn format_auth_status_table(status: &AuthStatus) -> String {
    if !status.authenticated {
        return NOT_AUTHENTICATED.to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Setting", "Value"]);
    let rows = [
        ("API key source", status.source.as_deref()),
        ("API key", status.api_key.as_deref()),
        ("Name", status.name.as_deref()),
        ("Email", status.email.as_deref()),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            table.add_row(vec![label, value]);
        }
    }
    let mut out = table.to_string();
    if let Some(err) = &status.user_error {
        out.push_str(&format!("\nCould not fetch user info: {}", err));
    }
    out
}

pub fn format_login_result(name: &str, path: &Path) -> String {
    format!("Authenticated as {}. API key saved to {}", name, path.display())
}

pub fn format_logout_result(removed: bool, path: &Path) -> String {
    if removed {
        format!("API key removed from {}", path.display())
    } else {
        format!("No stored API key in {}", path.display())
    }
}
