use crate::command::Arg;
use crate::config::ResolvedConfig;

/// Maps every configuration field to its optional runner argument and
/// flattens the result in the runner's documented order. Presence of each
/// flag is decided here, in one place, rather than by guard conditions
/// scattered across call sites.
///
/// `base_path`, `runner_config`, and `test_output` arrive already defaulted,
/// absolutized, and (for the output directory) created by the orchestrator.
pub fn runner_arguments(
    cfg: &ResolvedConfig,
    base_path: Option<&str>,
    runner_config: &str,
    test_output: Option<&str>,
) -> Vec<Arg> {
    let entries: Vec<Option<Arg>> = vec![
        value_arg("--basePath", base_path),
        value_arg("--browser", cfg.browser.as_deref()),
        value_arg("--browserTimeout", cfg.browser_timeout.as_deref()),
        flag_arg("--captureConsole", cfg.capture_console),
        Some(Arg::value("--config", runner_config)),
        value_arg("--dryRunFor", cfg.dry_run_for.as_deref()),
        value_arg("--plugins", cfg.plugins.as_deref()),
        value_arg("--port", cfg.port.as_deref()),
        flag_arg("--preloadFiles", cfg.preload_files),
        value_arg("--requiredBrowsers", cfg.required_browsers.as_deref()),
        flag_arg("--reset", cfg.reset),
        value_arg("--runnerMode", cfg.runner_mode.as_deref()),
        value_arg("--server", cfg.server.as_deref()),
        value_arg("--serverHandlerPrefix", cfg.server_handler_prefix.as_deref()),
        value_arg("--testOutput", test_output),
        Some(Arg::value("--tests", &cfg.tests)),
        flag_arg("--verbose", cfg.verbose),
    ];
    entries.into_iter().flatten().collect()
}

/// An empty configured value never renders (`--flag ""` is forbidden).
fn value_arg(name: &str, value: Option<&str>) -> Option<Arg> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| Arg::value(name, v))
}

fn flag_arg(name: &str, enabled: bool) -> Option<Arg> {
    enabled.then(|| Arg::flag(name))
}
