use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::build_log::BuildLog;
use crate::command::{CommandSpec, SEARCH_PATH_SEPARATOR};
use crate::config::ResolvedConfig;
use crate::locate::{Coordinate, java_runtime_available, locate_java, resolve_runner_jar};
use crate::paths;
use crate::results::{ResultPolicy, process_results};
use crate::runner_args::runner_arguments;
use crate::streaming::run_streaming_capture;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("unable to resolve test runner artifact {coordinate}")]
    ArtifactNotFound { coordinate: String },

    #[error("missing runner: {runner} ({hint})")]
    MissingRunner { runner: String, hint: String },

    #[error("failed to spawn process: {0}")]
    Spawn(std::io::Error),

    #[error("failed to wait on process: {0}")]
    Wait(std::io::Error),

    #[error("process terminated abnormally: {command}")]
    Terminated { command: String },

    #[error("tests failed: {summary}")]
    TestsFailed { summary: String },
}

impl RunError {
    pub fn is_test_failure(&self) -> bool {
        matches!(self, Self::TestsFailed { .. })
    }

    /// Exit code for the `jstdrive` binary: test content failures are 1,
    /// everything else (configuration, resolution, infrastructure) is 2.
    pub fn process_exit_code(&self) -> i32 {
        if self.is_test_failure() { 1 } else { 2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// `skipTests` was set; nothing was spawned.
    Skipped,
    /// The runner config file does not exist; warned, nothing was spawned.
    MissingRunnerConfig,
    /// The runner executed and every test passed.
    Passed,
}

pub struct GoalContext<'a> {
    /// The current build directory; working directory of the child process
    /// and the fallback base path.
    pub cwd: PathBuf,
    pub policy: &'a dyn ResultPolicy,
    pub log: &'a dyn BuildLog,
}

/// The whole goal: skip check, runner-config check, command assembly,
/// execution with live capture, result interpretation. Linear, one child
/// process at most, no retries.
pub fn run_goal(cfg: &ResolvedConfig, ctx: &GoalContext) -> Result<GoalOutcome, RunError> {
    print_banner(ctx.log);

    if cfg.skip_tests {
        ctx.log.info("tests are skipped due to the skipTests setting");
        return Ok(GoalOutcome::Skipped);
    }

    let base = defaulted_base_path(cfg, &ctx.cwd);
    let runner_config = paths::absolutize_under(&base, &cfg.config);
    if !runner_config.exists() {
        ctx.log.warn(&format!(
            "NO TESTS RUN - unable to locate runner config {}",
            paths::display_path(&runner_config)
        ));
        return Ok(GoalOutcome::MissingRunnerConfig);
    }

    let spec = build_invocation(cfg, &base, &runner_config)?;
    if cfg.verbose {
        ctx.log.info(&format!("running: {}", spec.display()));
    }

    let (exit_code, transcript) = run_streaming_capture(&spec, &ctx.cwd, ctx.log)?;
    process_results(ctx.policy, &transcript, exit_code)?;
    Ok(GoalOutcome::Passed)
}

/// Base path with the `basePath` config falling back to the build directory.
fn defaulted_base_path(cfg: &ResolvedConfig, cwd: &Path) -> PathBuf {
    match cfg.base_path.as_deref().filter(|b| !b.trim().is_empty()) {
        Some(base) => PathBuf::from(base),
        None => cwd.to_path_buf(),
    }
}

pub fn build_invocation(
    cfg: &ResolvedConfig,
    base: &Path,
    runner_config: &Path,
) -> Result<CommandSpec, RunError> {
    let java = locate_java()?;
    if !java_runtime_available(&java) {
        return Err(RunError::MissingRunner {
            runner: "java".to_string(),
            hint: format!("{} failed to run -version", java.display()),
        });
    }
    let jar = resolve_runner_jar(
        cfg.jar.as_deref(),
        cfg.local_repository.as_deref(),
        &Coordinate::jstestdriver(),
    )?;

    let mut spec = CommandSpec::new(java.to_string_lossy())?;
    if let Some(jvm_opts) = &cfg.jvm_opts {
        jvm_opts
            .split_whitespace()
            .for_each(|token| spec.host_option(token));
    }
    spec.search_path(cfg.classpath.iter(), SEARCH_PATH_SEPARATOR);
    spec.arg_value("-jar", jar.to_string_lossy());

    let base_path_arg = if cfg.default_base_path {
        Some(base.to_string_lossy().into_owned())
    } else {
        cfg.base_path.clone()
    };
    let test_output = prepare_test_output(cfg.test_output.as_deref(), base)?;

    runner_arguments(
        cfg,
        base_path_arg.as_deref(),
        &runner_config.to_string_lossy(),
        test_output.as_deref(),
    )
    .into_iter()
    .for_each(|arg| spec.push(arg));

    Ok(spec)
}

/// Absolutizes the test-output directory under the base path and creates it
/// if missing. The bare current-directory marker is handed through untouched.
pub fn prepare_test_output(
    test_output: Option<&str>,
    base: &Path,
) -> Result<Option<String>, RunError> {
    let Some(raw) = test_output.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };
    if raw == "." {
        return Ok(Some(raw.to_string()));
    }
    let dir = paths::absolutize_under(base, raw);
    paths::ensure_dir(&dir)?;
    Ok(Some(dir.to_string_lossy().into_owned()))
}

fn print_banner(log: &dyn BuildLog) {
    log.info("-------------------------------------------");
    log.info(" J S  T E S T  D R I V E R");
    log.info("-------------------------------------------");
}
