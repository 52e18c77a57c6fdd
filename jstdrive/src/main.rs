use std::path::PathBuf;

use jstdrive::args::derive_resolved;
use jstdrive::build_log::StdoutLog;
use jstdrive::config::{CONFIG_FILE_NAME, load_jstdrive_config};
use jstdrive::results::SummaryLinePolicy;
use jstdrive::run::{GoalContext, GoalOutcome, run_goal};

fn main() {
    let argv0 = std::env::args().skip(1).collect::<Vec<_>>();
    if argv0.iter().any(|t| t == "--help" || t == "-h") {
        print_help();
        return;
    }

    let (config_file, argv) = extract_config_file(&argv0);
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_path = config_file
        .map(PathBuf::from)
        .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));

    let file_cfg = match load_jstdrive_config(&config_path) {
        Ok(cfg) => cfg.unwrap_or_default(),
        Err(err) => {
            eprintln!("jstdrive: {err}");
            std::process::exit(2);
        }
    };
    let resolved = match derive_resolved(&file_cfg, &argv) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("jstdrive: {err}");
            std::process::exit(2);
        }
    };
    if resolved.verbose {
        eprintln!(
            "jstdrive: config={} cwd={} skipTests={}",
            config_path.display(),
            cwd.display(),
            resolved.skip_tests
        );
    }

    let log = StdoutLog::new();
    let policy = SummaryLinePolicy;
    let ctx = GoalContext {
        cwd,
        policy: &policy,
        log: &log,
    };

    match run_goal(&resolved, &ctx) {
        Ok(outcome) => {
            if resolved.verbose {
                let label = match outcome {
                    GoalOutcome::Skipped => "skipped",
                    GoalOutcome::MissingRunnerConfig => "no tests run",
                    GoalOutcome::Passed => "passed",
                };
                eprintln!("jstdrive: outcome: {label}");
            }
        }
        Err(err) => {
            eprintln!("jstdrive: {err}");
            std::process::exit(err.process_exit_code());
        }
    }
}

/// `--config-file` has to be known before the config file can contribute
/// parse tokens, so it is peeled off ahead of the real parse.
fn extract_config_file(argv: &[String]) -> (Option<String>, Vec<String>) {
    let mut out: Vec<String> = vec![];
    let mut config_file: Option<String> = None;

    let mut i = 0usize;
    while i < argv.len() {
        let tok = argv[i].as_str();
        if tok == "--config-file" || tok.starts_with("--config-file=") {
            let v = tok
                .split_once('=')
                .map(|(_, v)| v.to_string())
                .or_else(|| argv.get(i + 1).cloned());
            if let Some(v) = v {
                config_file = Some(v);
                i += if tok.contains('=') { 1 } else { 2 };
                continue;
            }
        }
        out.push(argv[i].clone());
        i += 1;
    }

    (config_file, out)
}

fn print_help() {
    let msg = r#"jstdrive

Usage:
  jstdrive [--config-file <path>] [--skipTests] [--jar <path>] [flags...]

Flags mirror jstdrive.config.json fields (command line wins):
  --skipTests                    Skip the whole test goal
  --jar <path>                   Explicit runner JAR (skips artifact resolution)
  --jvmOpts <opts>               Extra JVM options, whitespace separated
  --defaultBasePath=<bool>       Default basePath to the build directory (default true)
  --basePath <path>              Base path for relative runner paths
  --browser <paths>              Browser executables for the runner to capture
  --browserTimeout <ms>          Browser response timeout
  --captureConsole=<bool>        Capture browser console output (default true)
  --config <path>                Runner config file (default src/test/resources/jsTestDriver.conf)
  --dryRunFor <expr>             List matched tests without running them
  --plugins <paths>              Runner plugin archives
  --port <port>                  Start the runner server on this port
  --preloadFiles                 Preload test resources
  --requiredBrowsers <names>     Fail unless these browsers are captured
  --reset                        Reset browser state before running
  --runnerMode <mode>            Runner logging mode (e.g. DEBUG)
  --server <url>                 Use an already-running server
  --serverHandlerPrefix <p>      Server handler prefix
  --testOutput <dir>             Write runner reports here (created if missing)
  --tests <expr>                 Tests to run (default all)
  --verbose                      Echo the full command line and outcome
  --classpath <a,b,...>          Extra search path entries for the JVM
  --localRepository <path>       Local artifact repository root
  --config-file <path>           Alternate jstdrive.config.json location

Exit codes: 0 tests passed (or skipped / no config), 1 tests failed,
2 configuration or infrastructure error.
"#;
    println!("{msg}");
}
