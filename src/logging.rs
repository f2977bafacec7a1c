//! Logging System
//!
//! Structured diagnostics through `tracing`. Standard output belongs to command
//! results, so logs go to stderr (or a file) unless configured otherwise. Classified
//! errors are printed by the binary itself, so the default level stays at `error` and
//! a failing command writes nothing but its error document.

use crate::error::LmsqError;
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub const LOG_ENV: &str = "LMSQ_LOG";
pub const LOG_FORMAT_ENV: &str = "LMSQ_LOG_FORMAT";
pub const LOG_OUTPUT_ENV: &str = "LMSQ_LOG_OUTPUT";

/// Logging configuration, read from the `[logging]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; `--quiet` turns it off
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path, required when output is "file"
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format on a terminal stream only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `lmsq::api = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "error".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. CLI flags (already folded into `config` by the binary)
/// 2. Environment variables (LMSQ_LOG, LMSQ_LOG_FORMAT, LMSQ_LOG_OUTPUT)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), LmsqError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(std::env::var(LOG_ENV).ok(), config)?;
    let format = determine_format(std::env::var(LOG_FORMAT_ENV).ok(), config)?;
    let output = determine_output(std::env::var(LOG_OUTPUT_ENV).ok(), config)?;

    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File => BoxMakeWriter::new(Mutex::new(open_log_file(config)?)),
    };
    let use_color = use_ansi(config.color, output, stream_is_terminal(output));

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| LmsqError::Config(format!("Failed to initialize logging: {}", e)))
}

fn stream_is_terminal(output: LogOutput) -> bool {
    match output {
        LogOutput::Stdout => std::io::stdout().is_terminal(),
        LogOutput::Stderr => std::io::stderr().is_terminal(),
        LogOutput::File => false,
    }
}

/// ANSI only for a stream that is a terminal; never for files or pipes.
fn use_ansi(color: bool, output: LogOutput, is_terminal: bool) -> bool {
    color && output != LogOutput::File && is_terminal
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, LmsqError> {
    let log_file = config
        .file
        .clone()
        .ok_or_else(|| LmsqError::Config("log output is \"file\" but no log file is set".to_string()))?;

    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LmsqError::Config(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| LmsqError::Config(format!("Failed to open log file {:?}: {}", log_file, e)))
}

/// `LMSQ_LOG` is a complete filter directive and wins over the config.
fn build_env_filter(env: Option<String>, config: &LoggingConfig) -> Result<EnvFilter, LmsqError> {
    if let Some(directive) = env.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(&directive)
            .map_err(|e| LmsqError::Config(format!("Invalid {}: {}", LOG_ENV, e)));
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LmsqError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| LmsqError::Config(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

fn determine_format(env: Option<String>, config: &LoggingConfig) -> Result<String, LmsqError> {
    if let Some(format) = env {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.format.as_str();
    if format != "json" && format != "text" {
        return Err(LmsqError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

fn determine_output(env: Option<String>, config: &LoggingConfig) -> Result<LogOutput, LmsqError> {
    match env {
        Some(output) => parse_output(&output),
        None => parse_output(&config.output),
    }
}

fn parse_output(output: &str) -> Result<LogOutput, LmsqError> {
    match output {
        "stdout" => Ok(LogOutput::Stdout),
        "stderr" => Ok(LogOutput::Stderr),
        "file" => Ok(LogOutput::File),
        _ => Err(LmsqError::Config(format!(
            "Invalid log output: {} (must be 'stderr', 'stdout' or 'file')",
            output
        ))),
    }
}
