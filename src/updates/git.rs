//! Version-control operations behind a trait seam.
//!
//! The reconciler only needs six primitives; putting them behind [`Git`]
//! lets the state machine be tested without a network or a git binary.
//! [`GitCli`] is the production implementation and shells out to `git`,
//! which is a detected precondition of the launcher, not something it
//! installs.

use crate::shell;
use std::path::Path;
use thiserror::Error;

/// A failed git operation, carrying the tool's own diagnostic.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GitError {
    pub message: String,
}

impl GitError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The version-control primitives the reconciler drives.
pub trait Git {
    /// Whether the underlying tool can run at all. The reconciler refuses
    /// to touch the working copy when it cannot, since "git is broken" is
    /// indistinguishable from "metadata is invalid" once commands start
    /// failing.
    fn available(&self) -> bool;

    /// Whether `path` holds valid version-control metadata.
    fn is_repository(&self, path: &Path) -> bool;

    /// Clone `url` into `path`.
    fn clone_repo(&self, url: &str, path: &Path) -> Result<(), GitError>;

    /// Fetch remote references for the working copy at `path`.
    fn fetch(&self, path: &Path) -> Result<(), GitError>;

    /// Commit hash of the currently checked-out commit.
    fn head_commit(&self, path: &Path) -> Result<String, GitError>;

    /// Commit hash of the tracked upstream tip, `None` if no upstream
    /// (or fallback default branch) can be resolved.
    fn upstream_commit(&self, path: &Path) -> Result<Option<String>, GitError>;

    /// Pull the tracked branch into the working copy.
    fn pull(&self, path: &Path) -> Result<(), GitError>;
}

/// Production [`Git`] implementation over the `git` command-line client.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    fn git(&self, args: &[&str], cwd: Option<&Path>) -> Result<shell::CommandResult, GitError> {
        let result = shell::run("git", args, cwd).map_err(|e| GitError::new(e.to_string()))?;
        if result.success {
            Ok(result)
        } else {
            Err(GitError::new(result.brief_error()))
        }
    }
}

impl Git for GitCli {
    fn available(&self) -> bool {
        // Actually run it; a binary that is on PATH but cannot execute is
        // just as unusable as an absent one.
        shell::run("git", &["--version"], None)
            .map(|r| r.success)
            .unwrap_or(false)
    }

    fn is_repository(&self, path: &Path) -> bool {
        // The .git check keeps a working copy nested inside some other
        // repository from passing as our own.
        path.join(".git").exists()
            && shell::run("git", &["rev-parse", "--git-dir"], Some(path))
                .map(|r| r.success)
                .unwrap_or(false)
    }

    fn clone_repo(&self, url: &str, path: &Path) -> Result<(), GitError> {
        let path_str = path.to_string_lossy();
        self.git(&["clone", "--quiet", url, &path_str], None)?;
        Ok(())
    }

    fn fetch(&self, path: &Path) -> Result<(), GitError> {
        self.git(&["fetch", "--quiet"], Some(path))?;
        Ok(())
    }

    fn head_commit(&self, path: &Path) -> Result<String, GitError> {
        let result = self.git(&["rev-parse", "HEAD"], Some(path))?;
        Ok(result.stdout.trim().to_string())
    }

    fn upstream_commit(&self, path: &Path) -> Result<Option<String>, GitError> {
        // Tracked upstream first, then the conventional default branches.
        for reference in ["@{u}", "origin/main", "origin/master"] {
            if let Ok(result) = self.git(&["rev-parse", reference], Some(path)) {
                return Ok(Some(result.stdout.trim().to_string()));
            }
        }
        Ok(None)
    }

    fn pull(&self, path: &Path) -> Result<(), GitError> {
        self.git(&["pull", "--quiet"], Some(path))?;
        Ok(())
    }
}
