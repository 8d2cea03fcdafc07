//! Clone-or-fetch-compare-pull state machine.
//!
//! Reconciliation decides whether the local working copy is behind its
//! tracked remote and, if so, synchronizes it. The guiding rule: an update
//! must never block the user from running *some* working copy. Every failure
//! mode downgrades to "run what we have" except the one irrecoverable case
//! of no working copy existing and being unclonable.
//!
//! Commit hashes are opaque identifiers compared for equality only. No
//! ancestry check is made, so "local has diverged" and "remote is ahead"
//! both read as an available update; the subsequent pull sorts out which.

use crate::outcome::StepOutcome;
use crate::updates::git::Git;
use std::path::{Path, PathBuf};

/// Snapshot of the working copy's version-control state, recomputed each run.
#[derive(Debug, Clone)]
pub struct RepositoryState {
    /// Working-copy directory.
    pub local_path: PathBuf,

    /// Remote repository URL.
    pub remote_url: String,

    /// Currently checked-out commit. A failed fetch must not reset this;
    /// the stale value means "use the local copy as-is".
    pub local_commit: Option<String>,

    /// Tip of the tracked upstream branch, when resolvable.
    pub remote_commit: Option<String>,
}

/// What the hash comparison decided, and how any attempted sync went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    /// The version-control tool itself cannot run. Nothing was touched;
    /// whatever is on disk is launched as-is.
    GitUnavailable,

    /// No usable working copy existed; a clone was attempted.
    NoRepository,

    /// Local and remote hashes are equal (or no upstream is configured,
    /// which makes "update" undefined). Nothing to do.
    UpToDate,

    /// Hashes differ; a pull was attempted and succeeded.
    UpdateAvailable,

    /// Fetching remote references failed; the local copy is used unmodified.
    FetchFailed,

    /// A pull was attempted and failed; the pre-pull copy is used.
    PullFailed,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub decision: UpdateDecision,
    pub state: RepositoryState,
    pub outcome: StepOutcome,
}

impl ReconcileReport {
    fn new(
        decision: UpdateDecision,
        state: RepositoryState,
        outcome: StepOutcome,
    ) -> Self {
        Self {
            decision,
            state,
            outcome,
        }
    }
}

/// Run one clone-or-fetch-compare-pull pass.
///
/// Transitions:
/// 0. Git itself cannot run: warn and leave the directory alone entirely.
/// 1. No version-control metadata at `local_path`: clone. Clone failure is
///    fatal; success leaves a fully populated fresh state.
/// 2. Metadata present: fetch. Fetch failure is a warning and preserves the
///    pre-fetch state.
/// 3. Resolve local and upstream hashes. An unresolvable upstream is treated
///    as up-to-date, since there is no well-defined update without one.
/// 4. Equal hashes: up-to-date. Unequal: pull, where failure is again only
///    a warning.
pub fn reconcile(git: &dyn Git, remote_url: &str, local_path: &Path) -> ReconcileReport {
    let mut state = RepositoryState {
        local_path: local_path.to_path_buf(),
        remote_url: remote_url.to_string(),
        local_commit: None,
        remote_commit: None,
    };

    // An unrunnable git makes every later probe report failure, including
    // the metadata check that gates the destructive re-clone. Bail out
    // before touching the directory.
    if !git.available() {
        tracing::warn!("git is not runnable; skipping update check");
        return ReconcileReport::new(
            UpdateDecision::GitUnavailable,
            state,
            StepOutcome::Warning(
                "git not found on PATH; launching the local copy as-is".to_string(),
            ),
        );
    }

    if !git.is_repository(local_path) {
        return clone_fresh(git, &mut state);
    }

    // Resolve the local head before fetching so a failed fetch cannot
    // disturb it.
    state.local_commit = git.head_commit(local_path).ok();

    if let Err(e) = git.fetch(local_path) {
        tracing::warn!("fetch failed: {}", e);
        return ReconcileReport::new(
            UpdateDecision::FetchFailed,
            state,
            StepOutcome::Warning(format!("fetch failed ({e}); using local copy as-is")),
        );
    }

    let remote = match git.upstream_commit(local_path) {
        Ok(Some(hash)) => hash,
        Ok(None) | Err(_) => {
            tracing::info!("no tracked upstream; skipping update check");
            return ReconcileReport::new(UpdateDecision::UpToDate, state, StepOutcome::Success);
        }
    };
    state.remote_commit = Some(remote.clone());

    if state.local_commit.as_deref() == Some(remote.as_str()) {
        tracing::info!("working copy is up to date");
        return ReconcileReport::new(UpdateDecision::UpToDate, state, StepOutcome::Success);
    }

    tracing::info!("update available, pulling");
    match git.pull(local_path) {
        Ok(()) => {
            state.local_commit = git.head_commit(local_path).ok();
            ReconcileReport::new(UpdateDecision::UpdateAvailable, state, StepOutcome::Success)
        }
        Err(e) => {
            tracing::warn!("pull failed: {}", e);
            ReconcileReport::new(
                UpdateDecision::PullFailed,
                state,
                StepOutcome::Warning(format!("pull failed ({e}); running pre-pull copy")),
            )
        }
    }
}

/// Clone into a path with no usable repository.
///
/// A directory that exists but holds no valid metadata (interrupted clone,
/// stray files) is removed first and re-cloned.
fn clone_fresh(git: &dyn Git, state: &mut RepositoryState) -> ReconcileReport {
    let path = state.local_path.clone();

    if path.exists() {
        tracing::warn!("removing invalid working copy at {}", path.display());
        if let Err(e) = std::fs::remove_dir_all(&path) {
            return ReconcileReport::new(
                UpdateDecision::NoRepository,
                state.clone(),
                StepOutcome::Fatal(format!(
                    "cannot replace invalid working copy at {}: {e}",
                    path.display()
                )),
            );
        }
    }

    match git.clone_repo(&state.remote_url, &path) {
        Ok(()) => {
            let head = git.head_commit(&path).ok();
            state.local_commit = head.clone();
            state.remote_commit = head;
            ReconcileReport::new(
                UpdateDecision::NoRepository,
                state.clone(),
                StepOutcome::Success,
            )
        }
        Err(e) => ReconcileReport::new(
            UpdateDecision::NoRepository,
            state.clone(),
            StepOutcome::Fatal(format!("clone failed: {e}")),
        ),
    }
}
