//! API key storage and resolution.
//!
//! Resolution order: `--api-key`, then `LEMONSQUEEZY_API_KEY`, then `api_key` in
//! the config file. Saving and removing rewrite only the `api_key` entry and keep
//! every other setting, starting from the file contents read at load time.

use crate::error::LmsqError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const API_KEY_ENV: &str = "LEMONSQUEEZY_API_KEY";
const API_KEY_FIELD: &str = "api_key";

/// Where the active API key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Env,
    Config,
    None,
}

impl ApiKeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeySource::Flag => "flag",
            ApiKeySource::Env => "env",
            ApiKeySource::Config => "config",
            ApiKeySource::None => "none",
        }
    }
}

impl fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential access for one invocation.
#[derive(Clone)]
pub struct CredentialStore {
    path: Option<PathBuf>,
    /// The config file as loaded; `None` when there was no file.
    loaded: Option<toml::Table>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("path", &self.path)
            .field("stored", &self.stored_key().map(mask_key))
            .finish()
    }
}

impl CredentialStore {
    /// `contents` is the text already read from the file at `path`, if it existed.
    pub fn new(path: Option<PathBuf>, contents: Option<&str>) -> Result<Self, LmsqError> {
        let loaded = contents.map(parse_table).transpose()?;
        Ok(Self { path, loaded })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn stored_key(&self) -> Option<&str> {
        self.loaded
            .as_ref()
            .and_then(|table| table.get(API_KEY_FIELD))
            .and_then(toml::Value::as_str)
    }

    /// The key to use, or `MissingApiKey`.
    pub fn resolve_api_key(&self, override_key: Option<&str>) -> Result<String, LmsqError> {
        if let Some(key) = non_empty(override_key) {
            return Ok(key.to_string());
        }
        if let Some(key) = env_key() {
            return Ok(key);
        }
        non_empty(self.stored_key())
            .map(str::to_string)
            .ok_or(LmsqError::MissingApiKey)
    }

    pub fn api_key_source(&self, override_key: Option<&str>) -> ApiKeySource {
        if non_empty(override_key).is_some() {
            ApiKeySource::Flag
        } else if env_key().is_some() {
            ApiKeySource::Env
        } else if non_empty(self.stored_key()).is_some() {
            ApiKeySource::Config
        } else {
            ApiKeySource::None
        }
    }

    /// Write `key` into the config file, creating it (and its directory) if needed.
    pub fn save_api_key(&self, key: &str) -> Result<PathBuf, LmsqError> {
        let path = self.require_path()?;
        let mut table = self.loaded.clone().unwrap_or_default();
        table.insert(API_KEY_FIELD.to_string(), toml::Value::String(key.to_string()));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_table(path, &table)?;
        debug!(config_path = %path.display(), "Saved API key");
        Ok(path.to_path_buf())
    }

    /// Remove the stored key. Returns whether a key was present.
    ///
    /// The file is deleted when nothing else is left in it.
    pub fn remove_api_key(&self) -> Result<bool, LmsqError> {
        let path = self.require_path()?;
        let Some(mut table) = self.loaded.clone() else {
            return Ok(false);
        };
        let removed = table.remove(API_KEY_FIELD).is_some();
        if table.is_empty() {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        } else if removed {
            write_table(path, &table)?;
        }
        debug!(config_path = %path.display(), removed, "Removed API key");
        Ok(removed)
    }

    fn require_path(&self) -> Result<&Path, LmsqError> {
        self.path.as_deref().ok_or_else(|| {
            LmsqError::Config("cannot locate a config directory; pass --config <path>".to_string())
        })
    }
}

/// Show the first 8 characters of a key, or `****` for short keys.
pub fn mask_key(key: &str) -> String {
    if key.chars().count() <= 8 {
        return "****".to_string();
    }
    let prefix: String = key.chars().take(8).collect();
    format!("{}…{}", prefix, "*".repeat(8))
}

fn env_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

fn non_empty(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}

fn parse_table(text: &str) -> Result<toml::Table, LmsqError> {
    text.parse::<toml::Table>()
        .map_err(|e| LmsqError::Config(format!("Invalid config file: {}", e)))
}

fn write_table(path: &Path, table: &toml::Table) -> Result<(), LmsqError> {
    let text = toml::to_string_pretty(table)
        .map_err(|e| LmsqError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, text)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}
