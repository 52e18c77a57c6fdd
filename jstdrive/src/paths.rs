use std::path::{Path, PathBuf};

use crate::run::RunError;

/// Relative paths land under `base` exactly once; absolute paths pass
/// through unchanged.
pub fn absolutize_under(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), RunError> {
    std::fs::create_dir_all(path).map_err(|e| RunError::Configuration {
        message: format!("failed to create {} directory: {e}", path.display()),
    })
}

/// Canonical form for user-facing messages; falls back to the input when the
/// path does not exist yet.
pub fn display_path(path: &Path) -> String {
    dunce::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
