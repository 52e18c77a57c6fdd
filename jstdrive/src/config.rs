use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::run::RunError;

pub const CONFIG_FILE_NAME: &str = "jstdrive.config.json";
pub const DEFAULT_RUNNER_CONFIG: &str = "src/test/resources/jsTestDriver.conf";
pub const DEFAULT_TESTS: &str = "all";

/// On-disk configuration. Every field is optional; CLI flags override file
/// values, and defaults fill whatever both leave unset (see `args`).
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JstdriveConfig {
    pub skip_tests: Option<bool>,
    pub jar: Option<String>,
    pub jvm_opts: Option<String>,
    pub default_base_path: Option<bool>,
    pub base_path: Option<String>,
    pub browser: Option<String>,
    pub browser_timeout: Option<String>,
    pub capture_console: Option<bool>,
    pub config: Option<String>,
    pub dry_run_for: Option<String>,
    pub plugins: Option<String>,
    pub port: Option<String>,
    pub preload_files: Option<bool>,
    pub required_browsers: Option<String>,
    pub reset: Option<bool>,
    pub runner_mode: Option<String>,
    pub server: Option<String>,
    pub server_handler_prefix: Option<String>,
    pub test_output: Option<String>,
    pub tests: Option<String>,
    pub verbose: Option<bool>,
    pub classpath: Option<Vec<String>>,
    pub local_repository: Option<String>,
}

/// A missing file is not an error (defaults apply); an unreadable or
/// malformed file is a configuration error and halts before anything runs.
pub fn load_jstdrive_config(path: &Path) -> Result<Option<JstdriveConfig>, RunError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|e| RunError::Configuration {
        message: format!("unable to read {}: {e}", path.display()),
    })?;
    let parsed = serde_json::from_str::<JstdriveConfig>(&text).map_err(|e| {
        RunError::Configuration {
            message: format!("malformed {}: {e}", path.display()),
        }
    })?;
    Ok(Some(parsed))
}

/// Fully-defaulted view the pipeline runs from. String options use `None`
/// for absent-or-empty; the orchestrator never sees raw `Option<Option<_>>`
/// layering.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub skip_tests: bool,
    pub jar: Option<String>,
    pub jvm_opts: Option<String>,
    pub default_base_path: bool,
    pub base_path: Option<String>,
    pub browser: Option<String>,
    pub browser_timeout: Option<String>,
    pub capture_console: bool,
    pub config: String,
    pub dry_run_for: Option<String>,
    pub plugins: Option<String>,
    pub port: Option<String>,
    pub preload_files: bool,
    pub required_browsers: Option<String>,
    pub reset: bool,
    pub runner_mode: Option<String>,
    pub server: Option<String>,
    pub server_handler_prefix: Option<String>,
    pub test_output: Option<String>,
    pub tests: String,
    pub verbose: bool,
    pub classpath: Vec<String>,
    pub local_repository: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            skip_tests: false,
            jar: None,
            jvm_opts: None,
            default_base_path: true,
            base_path: None,
            browser: None,
            browser_timeout: None,
            capture_console: true,
            config: DEFAULT_RUNNER_CONFIG.to_string(),
            dry_run_for: None,
            plugins: None,
            port: None,
            preload_files: false,
            required_browsers: None,
            reset: false,
            runner_mode: None,
            server: None,
            server_handler_prefix: None,
            test_output: None,
            tests: DEFAULT_TESTS.to_string(),
            verbose: false,
            classpath: vec![],
            local_repository: None,
        }
    }
}
