//! CLI output: error mapping from domain errors to the stable CLI surface.

use crate::error::{classify_error, get_exit_code, LmsqError};
use crate::output::{output_error, OutputMode};

/// Classify `e` and render it for `mode`. Returns the text for stderr and the exit code.
pub fn map_error(e: &LmsqError, mode: OutputMode) -> (String, i32) {
    let classified = classify_error(e);
    (output_error(&classified, mode), get_exit_code(&classified))
}
