//! Config file location: `$XDG_CONFIG_HOME/lmsq` or `~/.config/lmsq`.

use directories::BaseDirs;
use std::path::PathBuf;

const APP_DIR: &str = "lmsq";
const CONFIG_FILE: &str = "config.toml";

/// Directory holding the config file. `None` when no home directory can be found.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join(APP_DIR))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}
