use clap::Parser;

use crate::config::{
    DEFAULT_RUNNER_CONFIG, DEFAULT_TESTS, JstdriveConfig, ResolvedConfig,
};
use crate::run::RunError;

#[derive(Debug, Clone, Parser, Default)]
#[command(
    name = "jstdrive",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct JstdriveCli {
    #[arg(
        long = "skipTests",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    skip_tests: bool,

    #[arg(long = "jar")]
    jar: Option<String>,

    #[arg(long = "jvmOpts")]
    jvm_opts: Option<String>,

    #[arg(
        long = "defaultBasePath",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    default_base_path: bool,

    #[arg(long = "basePath")]
    base_path: Option<String>,

    #[arg(long = "browser")]
    browser: Option<String>,

    #[arg(long = "browserTimeout")]
    browser_timeout: Option<String>,

    #[arg(
        long = "captureConsole",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    capture_console: bool,

    #[arg(long = "config")]
    config: Option<String>,

    #[arg(long = "dryRunFor")]
    dry_run_for: Option<String>,

    #[arg(long = "plugins")]
    plugins: Option<String>,

    #[arg(long = "port")]
    port: Option<String>,

    #[arg(
        long = "preloadFiles",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    preload_files: bool,

    #[arg(long = "requiredBrowsers")]
    required_browsers: Option<String>,

    #[arg(
        long = "reset",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    reset: bool,

    #[arg(long = "runnerMode")]
    runner_mode: Option<String>,

    #[arg(long = "server")]
    server: Option<String>,

    #[arg(long = "serverHandlerPrefix")]
    server_handler_prefix: Option<String>,

    #[arg(long = "testOutput")]
    test_output: Option<String>,

    #[arg(long = "tests")]
    tests: Option<String>,

    #[arg(
        long = "verbose",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    verbose: bool,

    // Classpath entries accumulate across the config file and the command
    // line instead of overriding, matching how search paths compose.
    #[arg(long = "classpath", value_delimiter = ',', action = clap::ArgAction::Append)]
    classpath: Vec<String>,

    #[arg(long = "localRepository")]
    local_repository: Option<String>,
}

/// Renders the config file as CLI tokens so one parse covers file values and
/// command-line overrides, later tokens winning.
pub fn config_tokens(cfg: &JstdriveConfig) -> Vec<String> {
    let mut tokens: Vec<String> = vec![];
    let mut bool_token = |flag: &str, value: Option<bool>| {
        if let Some(value) = value {
            tokens.push(format!("--{flag}={value}"));
        }
    };
    bool_token("skipTests", cfg.skip_tests);
    bool_token("defaultBasePath", cfg.default_base_path);
    bool_token("captureConsole", cfg.capture_console);
    bool_token("preloadFiles", cfg.preload_files);
    bool_token("reset", cfg.reset);
    bool_token("verbose", cfg.verbose);

    let mut value_token = |flag: &str, value: Option<&String>| {
        if let Some(value) = value {
            tokens.push(format!("--{flag}={value}"));
        }
    };
    value_token("jar", cfg.jar.as_ref());
    value_token("jvmOpts", cfg.jvm_opts.as_ref());
    value_token("basePath", cfg.base_path.as_ref());
    value_token("browser", cfg.browser.as_ref());
    value_token("browserTimeout", cfg.browser_timeout.as_ref());
    value_token("config", cfg.config.as_ref());
    value_token("dryRunFor", cfg.dry_run_for.as_ref());
    value_token("plugins", cfg.plugins.as_ref());
    value_token("port", cfg.port.as_ref());
    value_token("requiredBrowsers", cfg.required_browsers.as_ref());
    value_token("runnerMode", cfg.runner_mode.as_ref());
    value_token("server", cfg.server.as_ref());
    value_token("serverHandlerPrefix", cfg.server_handler_prefix.as_ref());
    value_token("testOutput", cfg.test_output.as_ref());
    value_token("tests", cfg.tests.as_ref());
    value_token("localRepository", cfg.local_repository.as_ref());
    if let Some(classpath) = cfg.classpath.as_ref().filter(|c| !c.is_empty()) {
        tokens.push(format!("--classpath={}", classpath.join(",")));
    }
    tokens
}

pub fn derive_resolved(
    cfg: &JstdriveConfig,
    argv: &[String],
) -> Result<ResolvedConfig, RunError> {
    let mut tokens = vec!["jstdrive".to_string()];
    tokens.extend(config_tokens(cfg));
    tokens.extend(argv.iter().cloned());

    let cli = JstdriveCli::try_parse_from(&tokens).map_err(|e| RunError::Configuration {
        message: e.to_string(),
    })?;

    Ok(ResolvedConfig {
        skip_tests: cli.skip_tests,
        jar: non_empty(cli.jar),
        jvm_opts: non_empty(cli.jvm_opts),
        default_base_path: cli.default_base_path,
        base_path: non_empty(cli.base_path),
        browser: non_empty(cli.browser),
        browser_timeout: non_empty(cli.browser_timeout),
        capture_console: cli.capture_console,
        config: non_empty(cli.config).unwrap_or_else(|| DEFAULT_RUNNER_CONFIG.to_string()),
        dry_run_for: non_empty(cli.dry_run_for),
        plugins: non_empty(cli.plugins),
        port: non_empty(cli.port),
        preload_files: cli.preload_files,
        required_browsers: non_empty(cli.required_browsers),
        reset: cli.reset,
        runner_mode: non_empty(cli.runner_mode),
        server: non_empty(cli.server),
        server_handler_prefix: non_empty(cli.server_handler_prefix),
        test_output: non_empty(cli.test_output),
        tests: non_empty(cli.tests).unwrap_or_else(|| DEFAULT_TESTS.to_string()),
        verbose: cli.verbose,
        classpath: cli
            .classpath
            .into_iter()
            .filter(|entry| !entry.trim().is_empty())
            .collect(),
        local_repository: non_empty(cli.local_repository).map(std::path::PathBuf::from),
    })
}

/// Empty and whitespace-only strings mean "not configured".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
