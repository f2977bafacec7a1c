//! lmsq CLI Binary
//!
//! Command-line interface for the Lemon Squeezy API.

use clap::Parser;
use is_terminal::IsTerminal;
use lmsq::cli::{map_error, output_options, Cli, RunContext};
use lmsq::error::EXIT_SUCCESS;
use lmsq::logging::{init_logging, LoggingConfig};
use lmsq::output::resolve_output_mode;
use std::process;
use tracing::debug;

fn main() {
    let cli = Cli::parse();

    let options = output_options(&cli.output);
    let mode = resolve_output_mode(&options, std::io::stdout().is_terminal());

    // Config is loaded once; logging settings come from the same file.
    let context = match RunContext::new(cli.config.clone(), cli.api_key.clone(), options, mode) {
        Ok(ctx) => ctx,
        Err(e) => {
            let (message, code) = map_error(&e, mode);
            eprintln!("{}", message);
            process::exit(code);
        }
    };

    let logging_config = build_logging_config(&cli, context.config().logging.clone());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    debug!(mode = %mode, "lmsq starting");

    // stderr carries only the classified error.
    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            let (message, code) = map_error(&e, mode);
            eprintln!("{}", message);
            process::exit(code);
        }
    }
}

/// Build logging configuration from CLI args on top of the config file's section.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
