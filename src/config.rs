//! Launcher configuration.
//!
//! Configuration is compiled-in constants, not a config file: the launcher's
//! whole job is to work on a machine in an unknown state, so it cannot depend
//! on anything being present. The constants live in one immutable value that
//! is passed into the orchestrator at construction, which is also what lets
//! tests substitute doubles for the individual steps.

use crate::service::ServiceEndpoint;
use std::path::PathBuf;
use std::time::Duration;

/// Remote repository the working copy tracks.
const REMOTE_URL: &str = "https://github.com/onlyzerosonce/SigmaOne";

/// Default working-copy directory, relative to the current directory.
const LOCAL_PATH: &str = "./app_repo";

/// Application entry point inside the working copy.
const ENTRY_POINT: &str = "main.py";

/// Packages the application needs, in install order.
const DEPENDENCIES: &[&str] = &["PyQt5", "GitPython", "requests"];

/// Inference model the application expects the backend to serve.
const MODEL: &str = "llama2";

/// Immutable configuration for one launcher run.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Language interpreter executable name.
    pub interpreter: String,

    /// Package manager executable name, probed on PATH.
    pub package_manager: String,

    /// Ordered package names required for the application to run.
    pub dependencies: Vec<String>,

    /// Remote repository URL for clone/fetch/pull.
    pub remote_url: String,

    /// Working-copy directory.
    pub local_path: PathBuf,

    /// Entry point invoked inside the working copy.
    pub entry_point: String,

    /// Inference backend endpoint.
    pub endpoint: ServiceEndpoint,

    /// Model name the backend is expected to serve.
    pub model: String,

    /// Bound on the service reachability probe.
    pub probe_timeout: Duration,

    /// Skip the update-reconciliation step entirely.
    pub skip_update: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            interpreter: interpreter_name().to_string(),
            package_manager: package_manager_name().to_string(),
            dependencies: DEPENDENCIES.iter().map(|s| s.to_string()).collect(),
            remote_url: REMOTE_URL.to_string(),
            local_path: PathBuf::from(LOCAL_PATH),
            entry_point: ENTRY_POINT.to_string(),
            endpoint: ServiceEndpoint::ollama_default(),
            model: MODEL.to_string(),
            probe_timeout: Duration::from_millis(800),
            skip_update: false,
        }
    }
}

/// Platform-specific interpreter executable name.
fn interpreter_name() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Platform-specific package manager executable name.
fn package_manager_name() -> &'static str {
    if cfg!(windows) {
        "pip"
    } else {
        "pip3"
    }
}
