//! Merge rules: defaults first, later sources override.

use crate::api::DEFAULT_BASE_URL;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("base_url", DEFAULT_BASE_URL)?
        .set_default("logging.level", "error")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
