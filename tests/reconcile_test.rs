//! End-to-end reconciliation tests against real git repositories.
//!
//! These exercise `GitCli` and the clone/fetch/compare/pull state machine
//! with a bare "remote" on the local filesystem, covering the scenarios the
//! launcher hits in the field: fresh clone, already up to date, remote moved
//! ahead, remote gone, and a corrupted working copy.

use gantry::updates::{reconcile, GitCli, UpdateDecision};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run a git command in `cwd`, panicking with its stderr on failure.
fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("git not available");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A seed repository plus a bare clone acting as the remote.
struct Fixture {
    temp: TempDir,
    seed: std::path::PathBuf,
    remote_url: String,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let seed = temp.path().join("seed");
        std::fs::create_dir(&seed).unwrap();

        git(&["init", "-q"], &seed);
        git(&["config", "user.email", "test@gantry.dev"], &seed);
        git(&["config", "user.name", "Gantry Test"], &seed);
        std::fs::write(seed.join("main.py"), "print('hello')\n").unwrap();
        git(&["add", "-A"], &seed);
        git(&["commit", "-q", "-m", "initial"], &seed);

        let remote = temp.path().join("origin.git");
        git(
            &[
                "clone",
                "--bare",
                "-q",
                seed.to_str().unwrap(),
                remote.to_str().unwrap(),
            ],
            temp.path(),
        );

        let remote_url = remote.to_string_lossy().to_string();
        Self {
            temp,
            seed,
            remote_url,
        }
    }

    fn app_path(&self) -> std::path::PathBuf {
        self.temp.path().join("app_repo")
    }

    fn seed_head(&self) -> String {
        git(&["rev-parse", "HEAD"], &self.seed)
    }

    /// Commit a change in the seed repo and push it to the bare remote.
    fn advance_remote(&self) {
        std::fs::write(self.seed.join("update.py"), "print('updated')\n").unwrap();
        git(&["add", "-A"], &self.seed);
        git(&["commit", "-q", "-m", "update"], &self.seed);
        git(&["push", "-q", &self.remote_url, "HEAD"], &self.seed);
    }
}

#[test]
fn fresh_clone_then_up_to_date() {
    let fx = Fixture::new();
    let app = fx.app_path();

    let first = reconcile(&GitCli, &fx.remote_url, &app);
    assert_eq!(first.decision, UpdateDecision::NoRepository);
    assert!(first.outcome.can_proceed());
    assert!(app.join(".git").exists());
    assert_eq!(first.state.local_commit.as_deref(), Some(fx.seed_head().as_str()));

    // Second pass with no remote change is idempotent
    let second = reconcile(&GitCli, &fx.remote_url, &app);
    assert_eq!(second.decision, UpdateDecision::UpToDate);
    assert!(second.outcome.can_proceed());
}

#[test]
fn remote_ahead_pulls_and_updates_working_copy() {
    let fx = Fixture::new();
    let app = fx.app_path();

    reconcile(&GitCli, &fx.remote_url, &app);
    fx.advance_remote();

    let report = reconcile(&GitCli, &fx.remote_url, &app);
    assert_eq!(report.decision, UpdateDecision::UpdateAvailable);
    assert!(report.outcome.can_proceed());
    // The working copy now sits at the remote tip with the new file present
    assert_eq!(report.state.local_commit.as_deref(), Some(fx.seed_head().as_str()));
    assert!(app.join("update.py").exists());
}

#[test]
fn unreachable_remote_falls_back_to_local_copy() {
    let fx = Fixture::new();
    let app = fx.app_path();

    let cloned = reconcile(&GitCli, &fx.remote_url, &app);
    let head_before = cloned.state.local_commit.clone();

    // The remote disappears out from under us
    std::fs::remove_dir_all(fx.temp.path().join("origin.git")).unwrap();

    let report = reconcile(&GitCli, &fx.remote_url, &app);
    assert_eq!(report.decision, UpdateDecision::FetchFailed);
    assert!(report.outcome.is_warning());
    // Pre-fetch state is preserved: same commit, working copy untouched
    assert_eq!(report.state.local_commit, head_before);
    assert!(app.join("main.py").exists());
}

#[test]
fn stray_directory_is_replaced_by_a_clone() {
    let fx = Fixture::new();
    let app = fx.app_path();
    std::fs::create_dir(&app).unwrap();
    std::fs::write(app.join("leftover.txt"), "from an interrupted install").unwrap();

    let report = reconcile(&GitCli, &fx.remote_url, &app);
    assert_eq!(report.decision, UpdateDecision::NoRepository);
    assert!(report.outcome.can_proceed());
    assert!(!app.join("leftover.txt").exists());
    assert!(app.join("main.py").exists());
}

#[test]
fn unclonable_remote_is_fatal() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app_repo");
    let missing = temp.path().join("no-such-remote");

    let report = reconcile(&GitCli, &missing.to_string_lossy(), &app);
    assert_eq!(report.decision, UpdateDecision::NoRepository);
    assert!(!report.outcome.can_proceed());
}
