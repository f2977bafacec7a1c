//! Output mode resolution.

use serde::Serialize;
use std::fmt;

/// Exactly one of these is active per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Flat `key: value` lines, no decoration.
    Text,
    /// Colored detail views and aligned tables for terminals.
    Pretty,
    /// Flattened JSON.
    Json,
    /// The upstream envelope, untouched.
    JsonRaw,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Text => "text",
            OutputMode::Pretty => "pretty",
            OutputMode::Json => "json",
            OutputMode::JsonRaw => "json-raw",
        }
    }

    /// Whether errors in this mode are written as JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::JsonRaw)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output flags collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Force flattened JSON.
    pub json: bool,
    /// Force the raw envelope. Wins over everything else.
    pub json_raw: bool,
    /// Restrict output to these fields (plus `id`), in this order.
    pub fields: Option<Vec<String>>,
    /// List only: print ids.
    pub only_ids: bool,
    /// List only: print the total count. Checked before `only_ids`.
    pub count: bool,
    /// List only: request a single item. Applied when the request is built.
    pub first: bool,
    /// Single resource only: print one field's bare value.
    pub pluck: Option<String>,
    pub color: bool,
    pub no_color: bool,
}

/// Pick the output mode. First match wins:
/// `json_raw`, `json`, `no_color` (text), `color` (pretty), then the terminal check.
pub fn resolve_output_mode(options: &OutputOptions, interactive: bool) -> OutputMode {
    if options.json_raw {
        OutputMode::JsonRaw
    } else if options.json {
        OutputMode::Json
    } else if options.no_color {
        OutputMode::Text
    } else if options.color {
        OutputMode::Pretty
    } else if interactive {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}
