use crate::args::{config_tokens, derive_resolved};
use crate::config::{DEFAULT_RUNNER_CONFIG, JstdriveConfig};

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn everything_unset_yields_the_documented_defaults() {
    let resolved = derive_resolved(&JstdriveConfig::default(), &[]).unwrap();

    assert!(!resolved.skip_tests);
    assert!(resolved.default_base_path);
    assert!(resolved.capture_console);
    assert_eq!(resolved.config, DEFAULT_RUNNER_CONFIG);
    assert_eq!(resolved.tests, "all");
    assert!(!resolved.verbose);
    assert!(resolved.jar.is_none());
    assert!(resolved.classpath.is_empty());
}

#[test]
fn file_values_apply_when_the_command_line_is_silent() {
    let cfg = JstdriveConfig {
        browser: Some("/usr/bin/firefox".to_string()),
        port: Some("4224".to_string()),
        skip_tests: Some(true),
        ..JstdriveConfig::default()
    };
    let resolved = derive_resolved(&cfg, &[]).unwrap();

    assert_eq!(resolved.browser.as_deref(), Some("/usr/bin/firefox"));
    assert_eq!(resolved.port.as_deref(), Some("4224"));
    assert!(resolved.skip_tests);
}

#[test]
fn command_line_wins_over_file_values() {
    let cfg = JstdriveConfig {
        browser: Some("/usr/bin/firefox".to_string()),
        capture_console: Some(true),
        ..JstdriveConfig::default()
    };
    let resolved = derive_resolved(
        &cfg,
        &argv(&["--browser", "/usr/bin/chromium", "--captureConsole=false"]),
    )
    .unwrap();

    assert_eq!(resolved.browser.as_deref(), Some("/usr/bin/chromium"));
    assert!(!resolved.capture_console);
}

#[test]
fn bare_boolean_flags_mean_true() {
    let resolved =
        derive_resolved(&JstdriveConfig::default(), &argv(&["--reset", "--verbose"])).unwrap();
    assert!(resolved.reset);
    assert!(resolved.verbose);
}

#[test]
fn empty_string_values_normalize_to_unset() {
    let resolved = derive_resolved(
        &JstdriveConfig::default(),
        &argv(&["--browser=", "--server", "  "]),
    )
    .unwrap();
    assert!(resolved.browser.is_none());
    assert!(resolved.server.is_none());
}

#[test]
fn classpath_entries_accumulate_across_file_and_command_line() {
    let cfg = JstdriveConfig {
        classpath: Some(vec!["a.jar".to_string(), "b.jar".to_string()]),
        ..JstdriveConfig::default()
    };
    let resolved = derive_resolved(&cfg, &argv(&["--classpath", "c.jar"])).unwrap();

    assert_eq!(resolved.classpath, vec!["a.jar", "b.jar", "c.jar"]);
}

#[test]
fn unknown_flags_are_a_configuration_error() {
    let err = derive_resolved(&JstdriveConfig::default(), &argv(&["--nope"])).unwrap_err();
    assert!(err.to_string().contains("configuration error"));
}

#[test]
fn config_tokens_only_cover_set_fields() {
    assert!(config_tokens(&JstdriveConfig::default()).is_empty());

    let cfg = JstdriveConfig {
        verbose: Some(true),
        tests: Some("MyCase".to_string()),
        ..JstdriveConfig::default()
    };
    let tokens = config_tokens(&cfg);
    assert!(tokens.contains(&"--verbose=true".to_string()));
    assert!(tokens.contains(&"--tests=MyCase".to_string()));
    assert_eq!(tokens.len(), 2);
}
