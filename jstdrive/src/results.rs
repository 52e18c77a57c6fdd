use std::sync::LazyLock;

use regex::Regex;

use crate::run::RunError;

/// The complete, order-preserving merged output of one child process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed { summary: String },
}

/// The runner's textual pass/fail convention belongs to the external tool,
/// so the matching rule is an injectable policy rather than parsing inlined
/// into the pipeline.
pub trait ResultPolicy {
    fn classify(&self, transcript: &Transcript, exit_code: i32) -> Verdict;
}

static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Total (\d+) tests \(Passed: (\d+); Fails: (\d+); Errors: (\d+)\)")
        .expect("summary pattern")
});

/// Default policy for JsTestDriver output: the run summary line
/// `Total N tests (Passed: N; Fails: N; Errors: N)` decides, with browser
/// error markers and the exit status as corroborating signals. Matching is
/// ANSI-stripped.
///
/// A non-zero exit overrides a clean-looking transcript: the runner owns its
/// exit status. A zero exit never overrides failure markers in the other
/// direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryLinePolicy;

impl ResultPolicy for SummaryLinePolicy {
    fn classify(&self, transcript: &Transcript, exit_code: i32) -> Verdict {
        let mut failing: Option<String> = None;
        transcript.lines().for_each(|raw| {
            let line = strip_ansi(raw);
            if let Some(caps) = SUMMARY_LINE.captures(&line) {
                let fails: u64 = caps[3].parse().unwrap_or(0);
                let errors: u64 = caps[4].parse().unwrap_or(0);
                if fails + errors > 0 && failing.is_none() {
                    failing = Some(line.trim().to_string());
                }
            } else if is_failure_marker(&line) && failing.is_none() {
                failing = Some(line.trim().to_string());
            }
        });
        if let Some(summary) = failing {
            return Verdict::Failed { summary };
        }
        if exit_code != 0 {
            return Verdict::Failed {
                summary: format!("test runner exited with status {exit_code}"),
            };
        }
        Verdict::Passed
    }
}

fn is_failure_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("Error:") || trimmed.contains("Tests failed")
}

fn strip_ansi(text: &str) -> String {
    let stripped = strip_ansi_escapes::strip(text.as_bytes());
    String::from_utf8_lossy(&stripped).into_owned()
}

/// A failing verdict becomes the build-halting error; it is never downgraded
/// to a log line.
pub fn process_results(
    policy: &dyn ResultPolicy,
    transcript: &Transcript,
    exit_code: i32,
) -> Result<(), RunError> {
    match policy.classify(transcript, exit_code) {
        Verdict::Passed => Ok(()),
        Verdict::Failed { summary } => Err(RunError::TestsFailed { summary }),
    }
}
