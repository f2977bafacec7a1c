//! User config file source: $XDG_CONFIG_HOME/lmsq/config.toml or ~/.config/lmsq/config.toml

use crate::error::LmsqError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use config::FileFormat;
use std::path::Path;
use tracing::debug;

/// Read the config file. A missing file is not an error.
pub fn read(path: &Path) -> Result<Option<String>, LmsqError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(config_path = %path.display(), "No configuration file");
            Ok(None)
        }
        Err(e) => Err(LmsqError::Config(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Add the file contents as a TOML source.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    contents: Option<&str>,
) -> ConfigBuilder<DefaultState> {
    match contents {
        Some(text) => builder.add_source(File::from_str(text, FileFormat::Toml)),
        None => builder,
    }
}
