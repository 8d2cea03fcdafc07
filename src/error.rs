//! Error types for Gantry operations.
//!
//! This module defines [`GantryError`], the primary error type used throughout
//! the launcher, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `GantryError` for the fatal bootstrap failures that need distinct
//!   diagnostics (missing interpreter, failed dependency install, unclonable
//!   repository)
//! - Use `anyhow::Error` (via `GantryError::Other`) for unexpected errors
//! - Recoverable conditions (unreachable service, failed fetch or pull) are
//!   not errors at all; they surface as warnings through
//!   [`StepOutcome`](crate::outcome::StepOutcome)

use thiserror::Error;

/// Core error type for Gantry operations.
///
/// Every variant here aborts the bootstrap sequence. The exact process exit
/// code is not part of the contract, but the diagnostic text distinguishes
/// the failure classes.
#[derive(Debug, Error)]
pub enum GantryError {
    /// The language interpreter is not on PATH. Nothing can run without it.
    #[error("Interpreter '{interpreter}' not found on PATH. Install it and re-run.")]
    InterpreterMissing { interpreter: String },

    /// The package manager is missing and the one-shot bootstrap attempt failed.
    #[error("Package manager '{manager}' not found and could not be bootstrapped: {message}")]
    PackageManagerMissing { manager: String, message: String },

    /// A dependency failed to install. The environment is unusable.
    #[error("Failed to install '{package}': {message}")]
    DependencyInstallFailed { package: String, message: String },

    /// No working copy exists and cloning the remote failed.
    #[error("Failed to clone '{url}': {message}")]
    RepoCloneFailed { url: String, message: String },

    /// A child process could not be spawned or exited abnormally.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GantryError {
    /// Suggested process exit code for this failure class.
    ///
    /// Only zero-vs-nonzero is contractual; the distinct codes exist so
    /// wrapper scripts can tell the failure classes apart without parsing
    /// diagnostic text.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InterpreterMissing { .. } => 2,
            Self::PackageManagerMissing { .. } => 3,
            Self::DependencyInstallFailed { .. } => 4,
            Self::RepoCloneFailed { .. } => 5,
            Self::CommandFailed { .. } | Self::Io(_) | Self::Other(_) => 1,
        }
    }
}

/// Result type alias for Gantry operations.
pub type Result<T> = std::result::Result<T, GantryError>;
