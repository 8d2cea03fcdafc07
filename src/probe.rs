//! Executable probing and the verified-environment record.
//!
//! The probe answers one question: does a named executable resolve on the
//! current PATH? It never invokes the tool, so probing has no side effects
//! and absence is a normal result rather than an error.
//!
//! Resolution iterates PATH entries directly instead of shelling out to
//! `which` — `which` behavior varies across systems and is sometimes a shell
//! builtin with inconsistent error handling.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What has been verified on the host so far.
///
/// Built incrementally as the bootstrap sequence runs and discarded after
/// the launch decision; nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Whether the language interpreter resolved on PATH.
    pub interpreter_found: bool,

    /// Whether the package manager resolved on PATH (possibly after the
    /// one-shot bootstrap remediation).
    pub package_manager_found: bool,

    /// Packages confirmed installed/upgraded this run. Records only what
    /// succeeded before any failure; there is no rollback.
    pub installed_packages: BTreeSet<String>,
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. On Windows the
/// `.exe` suffix is also tried, which is the only genuinely
/// platform-dependent part of command probing.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
        if cfg!(windows) {
            let candidate = dir.join(format!("{tool}.exe"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Probe the current PATH for a named executable.
pub fn command_on_path(tool: &str) -> bool {
    resolve_tool_path(tool, &parse_system_path()).is_some()
}
