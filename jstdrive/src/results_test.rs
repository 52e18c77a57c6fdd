use crate::results::{
    ResultPolicy, SummaryLinePolicy, Transcript, Verdict, process_results,
};

fn classify(text: &str, exit_code: i32) -> Verdict {
    SummaryLinePolicy.classify(&Transcript::from_text(text), exit_code)
}

#[test]
fn clean_summary_with_zero_exit_is_a_pass() {
    let verdict = classify(
        "setting runner mode [QUIET]\n..\nTotal 12 tests (Passed: 12; Fails: 0; Errors: 0)",
        0,
    );
    assert_eq!(verdict, Verdict::Passed);
}

#[test]
fn failing_summary_line_fails_with_that_line_as_summary() {
    let verdict = classify(
        "..F\nTotal 12 tests (Passed: 11; Fails: 1; Errors: 0)",
        0,
    );
    assert_eq!(
        verdict,
        Verdict::Failed {
            summary: "Total 12 tests (Passed: 11; Fails: 1; Errors: 0)".to_string()
        }
    );
}

#[test]
fn browser_errors_count_as_failures() {
    let verdict = classify("Total 3 tests (Passed: 2; Fails: 0; Errors: 1)", 0);
    assert!(matches!(verdict, Verdict::Failed { .. }));
}

#[test]
fn error_marker_without_summary_line_fails() {
    let verdict = classify("Error: Firefox failed to start", 0);
    assert_eq!(
        verdict,
        Verdict::Failed {
            summary: "Error: Firefox failed to start".to_string()
        }
    );
}

#[test]
fn nonzero_exit_overrides_a_clean_transcript() {
    let verdict = classify("Total 5 tests (Passed: 5; Fails: 0; Errors: 0)", 7);
    assert_eq!(
        verdict,
        Verdict::Failed {
            summary: "test runner exited with status 7".to_string()
        }
    );
}

#[test]
fn zero_exit_does_not_rescue_a_failing_transcript() {
    let verdict = classify("Total 2 tests (Passed: 1; Fails: 1; Errors: 0)", 0);
    assert!(matches!(verdict, Verdict::Failed { .. }));
}

#[test]
fn ansi_escapes_do_not_hide_the_summary_line() {
    let verdict = classify(
        "\u{1b}[31mTotal 2 tests (Passed: 1; Fails: 1; Errors: 0)\u{1b}[0m",
        0,
    );
    assert_eq!(
        verdict,
        Verdict::Failed {
            summary: "Total 2 tests (Passed: 1; Fails: 1; Errors: 0)".to_string()
        }
    );
}

#[test]
fn empty_transcript_with_zero_exit_passes() {
    assert_eq!(classify("", 0), Verdict::Passed);
}

#[test]
fn process_results_raises_the_build_halting_error_on_failure() {
    let transcript = Transcript::from_text("Total 2 tests (Passed: 1; Fails: 1; Errors: 0)");
    let err = process_results(&SummaryLinePolicy, &transcript, 0).unwrap_err();
    assert!(err.is_test_failure());

    let transcript = Transcript::from_text("Total 2 tests (Passed: 2; Fails: 0; Errors: 0)");
    assert!(process_results(&SummaryLinePolicy, &transcript, 0).is_ok());
}

#[test]
fn transcript_preserves_line_order_and_round_trips_text() {
    let mut transcript = Transcript::default();
    transcript.push_line("first");
    transcript.push_line("second");
    transcript.push_line("third");

    assert_eq!(transcript.text(), "first\nsecond\nthird");
    assert_eq!(Transcript::from_text(&transcript.text()), transcript);
    assert!(!transcript.is_empty());
}
