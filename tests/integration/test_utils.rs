//! Shared test utilities for integration tests
//!
//! Provides isolated config directories, a recording mock transport, and a helper
//! that runs a command line end to end without touching the network.

use async_trait::async_trait;
use clap::Parser;
use lmsq::api::{ApiRequest, ApiResponse, Transport};
use lmsq::cli::{map_error, output_options, Cli, RunContext};
use lmsq::config::ConfigLoader;
use lmsq::error::LmsqError;
use lmsq::output::resolve_output_mode;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const TRACKED_VARS: [&str; 4] = [
    "HOME",
    "XDG_CONFIG_HOME",
    "LEMONSQUEEZY_API_KEY",
    "LEMONSQUEEZY_BASE_URL",
];

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            vars: TRACKED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME inside `test_dir` and no
/// `LEMONSQUEEZY_*` variables set. The environment is restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());
    std::env::remove_var("LEMONSQUEEZY_API_KEY");
    std::env::remove_var("LEMONSQUEEZY_BASE_URL");

    let result = f();

    env_state.restore();

    result
}

/// Config file used by [`run_cli`] inside an isolated environment.
pub fn config_path(test_dir: &TempDir) -> PathBuf {
    test_dir.path().join("lmsq").join("config.toml")
}

/// Load a JSON fixture from `tests/fixtures`.
pub fn fixture(name: &str) -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap()
}

enum Scripted {
    Response(ApiResponse),
    Error(LmsqError),
}

/// Transport that replays scripted answers and records every request.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, response: ApiResponse) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Response(response));
        self
    }

    pub fn respond_with(&self, envelope: Value) -> &Self {
        self.respond(ApiResponse::ok(envelope))
    }

    pub fn fail(&self, error: LmsqError) -> &Self {
        self.script.lock().unwrap().push_back(Scripted::Error(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests()
            .pop()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, LmsqError> {
        self.requests.lock().unwrap().push(request);
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Error(error)) => Err(error),
            None => Ok(ApiResponse::failure("no scripted response", 500)),
        }
    }
}

/// Outcome of one command line, as the binary would report it.
#[derive(Debug)]
pub struct CliRun {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub exit_code: i32,
}

impl CliRun {
    pub fn stdout(&self) -> &str {
        self.stdout.as_deref().expect("command failed")
    }

    pub fn stderr(&self) -> &str {
        self.stderr.as_deref().expect("command succeeded")
    }
}

/// Parse `args` and execute them against `transport`. stdout is never a terminal.
/// Must be called inside [`with_xdg_env`].
pub fn run_cli(test_dir: &TempDir, args: &[&str], transport: Arc<MockTransport>) -> CliRun {
    let cli = Cli::try_parse_from(args).unwrap();
    let options = output_options(&cli.output);
    let mode = resolve_output_mode(&options, false);
    let path = cli.config.clone().unwrap_or_else(|| config_path(test_dir));
    let loaded = ConfigLoader::load_from_file(&path).unwrap();

    let context = RunContext::from_loaded(loaded, cli.api_key.clone(), options, mode)
        .with_transport(transport);
    match context.execute(&cli.command) {
        Ok(output) => CliRun {
            stdout: Some(output),
            stderr: None,
            exit_code: 0,
        },
        Err(e) => {
            let (message, exit_code) = map_error(&e, mode);
            CliRun {
                stdout: None,
                stderr: Some(message),
                exit_code,
            }
        }
    }
}
