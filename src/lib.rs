//! lmsq: Lemon Squeezy from the command line
//!
//! Fetches JSON:API resources, flattens them, and renders them as plain text,
//! decorated terminal output, or JSON. Failures are classified into stable
//! kinds with matching process exit codes.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod resources;
