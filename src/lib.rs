//! Gantry - bootstrap-and-launch orchestrator for a self-updating desktop
//! chat application.
//!
//! Gantry brings a machine from an unknown state to one where the
//! application can run: it verifies the interpreter and package manager,
//! installs the declared dependencies, probes the inference backend, and
//! reconciles the application's working copy with its remote before handing
//! off and forwarding the application's exit status.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Compiled-in launcher configuration
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Dependency installation and package-manager remediation
//! - [`launcher`] - Step sequencing and the final hand-off
//! - [`outcome`] - The uniform per-step result type
//! - [`probe`] - Executable probing and the verified-environment record
//! - [`service`] - Inference backend reachability probe
//! - [`shell`] - Child process execution
//! - [`ui`] - Console output
//! - [`updates`] - Working-copy clone/fetch/compare/pull reconciliation
//!
//! # Example
//!
//! ```no_run
//! use gantry::config::LauncherConfig;
//! use gantry::launcher::{default_context, LaunchOrchestrator};
//! use gantry::ui::{Output, OutputMode};
//!
//! let orchestrator = LaunchOrchestrator::new(LauncherConfig::default());
//! let out = Output::new(OutputMode::Normal);
//! let exit_code = orchestrator.run(&default_context(), &out)?;
//! # Ok::<(), gantry::GantryError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod launcher;
pub mod outcome;
pub mod probe;
pub mod service;
pub mod shell;
pub mod ui;
pub mod updates;

pub use error::{GantryError, Result};
