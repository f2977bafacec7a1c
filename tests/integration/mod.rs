//! Integration tests for the lmsq command-line client

mod binary_errors;
mod output_pipeline;
mod resource_commands;
mod test_utils;
