//! Configuration System
//!
//! Layered configuration built with the `config` crate: defaults, then the user's
//! config file, then `LEMONSQUEEZY_*` environment variables. The same file holds
//! the stored API key, managed by [`CredentialStore`].

use crate::api::DEFAULT_BASE_URL;
use crate::error::LmsqError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod credentials;
mod merge;
mod paths;
mod sources;

pub use credentials::{mask_key, ApiKeySource, CredentialStore, API_KEY_ENV};
pub use paths::{config_dir, default_config_path};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsqConfig {
    /// API key stored by `lmsq auth login`
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for LmsqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            logging: LoggingConfig::default(),
        }
    }
}

/// A loaded configuration plus the credential store backed by the same file.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: LmsqConfig,
    pub credentials: CredentialStore,
}

/// Loads configuration from its sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the default location (`$XDG_CONFIG_HOME/lmsq/config.toml`).
    pub fn load() -> Result<LoadedConfig, LmsqError> {
        Self::load_from(default_config_path())
    }

    /// Load from an explicit file. The file does not have to exist.
    pub fn load_from_file(path: &Path) -> Result<LoadedConfig, LmsqError> {
        Self::load_from(Some(path.to_path_buf()))
    }

    /// The file is read once; its contents feed both the layered config and the
    /// credential store.
    pub fn load_from(path: Option<PathBuf>) -> Result<LoadedConfig, LmsqError> {
        let contents = match &path {
            Some(path) => sources::global_file::read(path)?,
            None => None,
        };

        let credentials = CredentialStore::new(path, contents.as_deref())?;

        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder, contents.as_deref());
        let builder = sources::environment::add_to_builder(builder);
        let config: LmsqConfig = builder.build()?.try_deserialize()?;

        Ok(LoadedConfig {
            config,
            credentials,
        })
    }
}
