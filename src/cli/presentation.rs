//! CLI presentation: formatters for commands that do not print API resources.

mod action;
mod auth;
mod license;

pub use action::{format_action_result, format_meta_result};
pub use auth::{
    format_auth_status, format_login_result, format_logout_result, AuthStatus, NOT_AUTHENTICATED,
};
pub use license::format_license_result;
