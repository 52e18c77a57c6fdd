use jstdrive_tests::guards::files_over_line_limit;

#[test]
fn rust_files_do_not_exceed_max_physical_lines() {
    let max = 500;
    let over = files_over_line_limit(max);
    let rendered = over
        .iter()
        .map(|(path, lines)| format!("{lines} lines -> {}", path.display()))
        .collect::<Vec<_>>();

    assert!(
        rendered.is_empty(),
        "found {} files over limit ({max}):\n{}",
        rendered.len(),
        rendered.join("\n")
    );
}
