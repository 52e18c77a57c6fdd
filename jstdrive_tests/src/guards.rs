use std::path::PathBuf;

/// Directories that never hold our own sources.
fn skip_dir(name: &str) -> bool {
    matches!(name, "target" | ".git" | "examples" | "node_modules")
}

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("jstdrive_tests sits directly under the workspace root")
        .to_path_buf()
}

/// Every `.rs` file under a `src/` or `tests/` directory of the workspace,
/// sorted for stable failure output.
pub fn workspace_rust_files() -> Vec<PathBuf> {
    let mut files = walkdir::WalkDir::new(workspace_root())
        .into_iter()
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !skip_dir(name))
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            let as_text = path.to_string_lossy();
            path.extension().is_some_and(|ext| ext == "rs")
                && (as_text.contains("/src/") || as_text.contains("/tests/"))
        })
        .collect::<Vec<_>>();
    files.sort();
    files
}

/// `(path, line_count)` for every workspace source file longer than `max`
/// physical lines, longest first.
pub fn files_over_line_limit(max: usize) -> Vec<(PathBuf, usize)> {
    let mut over = workspace_rust_files()
        .into_iter()
        .filter_map(|path| {
            let text = std::fs::read_to_string(&path).ok()?;
            let lines = text.lines().count();
            (lines > max).then_some((path, lines))
        })
        .collect::<Vec<_>>();
    over.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    over
}
