//! Working-copy self-update reconciliation.
//!
//! This module provides:
//! - The [`Git`] seam and its [`GitCli`] implementation over the `git` binary
//! - The clone-or-fetch-compare-pull [`reconcile`] state machine
//! - [`RepositoryState`] and [`UpdateDecision`] snapshots

pub mod git;
pub mod reconciler;

pub use git::{Git, GitCli, GitError};
pub use reconciler::{reconcile, ReconcileReport, RepositoryState, UpdateDecision};
