use std::fmt;
use std::path::{Path, PathBuf};

use duct::cmd as duct_cmd;
use which::which;

use crate::run::RunError;

/// Artifact coordinate in a Maven-style local repository layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub file_type: String,
}

impl Coordinate {
    /// The runner this bridge drives.
    pub fn jstestdriver() -> Self {
        Self {
            group: "com.google.jstestdriver".to_string(),
            artifact: "jstestdriver".to_string(),
            version: "1.3.5".to_string(),
            file_type: "jar".to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}-{}.{}", self.artifact, self.version, self.file_type)
    }

    /// `<group-as-dirs>/<artifact>/<version>/<artifact>-<version>.<type>`
    pub fn repository_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        self.group.split('.').for_each(|segment| path.push(segment));
        path.push(&self.artifact);
        path.push(&self.version);
        path.push(self.file_name());
        path
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.artifact, self.version, self.file_type
        )
    }
}

/// An explicit `jar` setting short-circuits resolution; otherwise the
/// coordinate is looked up in the local repository and a missing archive is
/// a resolution failure carrying the coordinate.
pub fn resolve_runner_jar(
    explicit: Option<&str>,
    local_repository: Option<&Path>,
    coordinate: &Coordinate,
) -> Result<PathBuf, RunError> {
    if let Some(jar) = explicit.filter(|j| !j.trim().is_empty()) {
        return Ok(PathBuf::from(jar));
    }
    let root = local_repository
        .map(Path::to_path_buf)
        .or_else(default_local_repository)
        .ok_or_else(|| RunError::Configuration {
            message: "no local repository available; set localRepository or jar".to_string(),
        })?;
    let path = root.join(coordinate.repository_path());
    if !path.is_file() {
        return Err(RunError::ArtifactNotFound {
            coordinate: coordinate.to_string(),
        });
    }
    Ok(path)
}

pub fn default_local_repository() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".m2").join("repository"))
}

pub fn locate_java() -> Result<PathBuf, RunError> {
    which("java").map_err(|_| RunError::MissingRunner {
        runner: "java".to_string(),
        hint: "install a JRE or put java on PATH".to_string(),
    })
}

/// Quiet probe that the located binary actually runs. Never auto-installs or
/// prompts anything.
pub fn java_runtime_available(java: &Path) -> bool {
    duct_cmd(java, ["-version"])
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()
        .ok()
        .is_some_and(|o| o.status.success())
}
