//! Launch orchestration.
//!
//! Sequences the bootstrap steps in fixed order, interprets each step's
//! [`StepOutcome`] against the per-step failure policy, and finally hands
//! off to the application. The orchestrator is the only place that decides
//! fatal-vs-continue; steps themselves never abort the process.
//!
//! Order: interpreter probe, package-manager probe (with one bootstrap
//! remediation), dependency install, service probe, update reconciliation,
//! application launch. Only interpreter absence, an unremediable package
//! manager, a failed dependency install, and a failed clone are fatal.

use crate::config::LauncherConfig;
use crate::error::{GantryError, Result};
use crate::installer;
use crate::outcome::StepOutcome;
use crate::probe::{self, Environment};
use crate::service::{self, ServiceEndpoint};
use crate::shell;
use crate::ui::Output;
use crate::updates::{reconcile, GitCli, ReconcileReport, UpdateDecision};
use std::path::Path;
use std::time::Duration;

/// Mockable dependencies for the orchestrator.
///
/// Production wiring comes from [`default_context`]; tests substitute
/// closures so the whole launch sequence runs without touching the host.
pub struct LaunchContext<'a> {
    /// Check whether a named executable resolves on PATH.
    pub probe_command: &'a dyn Fn(&str) -> bool,

    /// Run an argv-style command, returning true on success.
    pub run_command: &'a dyn Fn(&[String]) -> bool,

    /// Probe the inference backend.
    pub probe_service: &'a dyn Fn(&ServiceEndpoint, Duration, &str) -> StepOutcome,

    /// Run one update-reconciliation pass for (remote URL, working copy).
    pub reconcile: &'a dyn Fn(&str, &Path) -> ReconcileReport,

    /// Spawn the application (interpreter, entry point, working copy) and
    /// wait; `None` means killed by signal.
    pub spawn_app: &'a dyn Fn(&str, &str, &Path) -> Result<Option<i32>>,
}

/// Build the default `LaunchContext` for production use.
pub fn default_context() -> LaunchContext<'static> {
    LaunchContext {
        probe_command: &probe::command_on_path,
        run_command: &|argv| shell::run_argv(argv, None),
        probe_service: &|endpoint, timeout, model| service::probe_outcome(endpoint, timeout, model),
        reconcile: &|url, path| reconcile(&GitCli, url, path),
        spawn_app: &|interpreter, entry_point, workdir| {
            shell::run_inherit(interpreter, &[entry_point], Some(workdir))
        },
    }
}

/// Drives the bootstrap sequence and the final hand-off.
pub struct LaunchOrchestrator {
    config: LauncherConfig,
}

impl LaunchOrchestrator {
    /// Create an orchestrator for one run.
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    /// Run the full sequence.
    ///
    /// Returns the application's exit code on successful hand-off; any
    /// fatal step surfaces as an error. Warnings accumulate and are
    /// reported but never halt progress.
    pub fn run(&self, ctx: &LaunchContext<'_>, out: &Output) -> Result<i32> {
        let cfg = &self.config;
        let mut env = Environment::default();
        let mut warnings: Vec<String> = Vec::new();

        // 1. Interpreter. Hard gate: nothing can run without it.
        out.step(&format!("Checking interpreter '{}'", cfg.interpreter));
        env.interpreter_found = (ctx.probe_command)(&cfg.interpreter);
        if !env.interpreter_found {
            return Err(GantryError::InterpreterMissing {
                interpreter: cfg.interpreter.clone(),
            });
        }
        out.success(&format!("{} found", cfg.interpreter));

        // 2. Package manager, with one bootstrap attempt.
        out.step(&format!("Checking package manager '{}'", cfg.package_manager));
        match installer::ensure_package_manager(
            &cfg.interpreter,
            &cfg.package_manager,
            ctx.probe_command,
            ctx.run_command,
        ) {
            StepOutcome::Success => {
                env.package_manager_found = true;
                out.success(&format!("{} found", cfg.package_manager));
            }
            StepOutcome::Warning(reason) => {
                env.package_manager_found = true;
                out.warning(&reason);
                warnings.push(reason);
            }
            StepOutcome::Fatal(message) => {
                return Err(GantryError::PackageManagerMissing {
                    manager: cfg.package_manager.clone(),
                    message,
                });
            }
        }

        // 3. Dependencies, in declared order, first failure aborts.
        out.step("Installing dependencies");
        let spinner = out.spinner("pip install");
        let install = installer::install_all(
            &cfg.interpreter,
            &cfg.dependencies,
            &mut env,
            ctx.run_command,
        );
        spinner.finish_and_clear();
        match install {
            StepOutcome::Success => {
                out.success(&format!("{} package(s) ready", env.installed_packages.len()));
            }
            StepOutcome::Warning(reason) => {
                out.warning(&reason);
                warnings.push(reason);
            }
            StepOutcome::Fatal(reason) => {
                let package = reason
                    .strip_prefix("failed to install ")
                    .unwrap_or(&reason)
                    .to_string();
                return Err(GantryError::DependencyInstallFailed {
                    package,
                    message: reason,
                });
            }
        }

        // 4. Service probe. The probe never reports fatal; anything that is
        // not success reads as a warning and the launch proceeds.
        out.step("Probing inference backend");
        match (ctx.probe_service)(&cfg.endpoint, cfg.probe_timeout, &cfg.model) {
            StepOutcome::Success => out.success("backend reachable"),
            StepOutcome::Warning(reason) | StepOutcome::Fatal(reason) => {
                out.warning(&reason);
                warnings.push(reason);
            }
        }

        // 5. Update reconciliation.
        if cfg.skip_update {
            out.step("Skipping update check");
        } else {
            out.step("Reconciling working copy");
            let spinner = out.spinner("syncing with remote");
            let report = (ctx.reconcile)(&cfg.remote_url, &cfg.local_path);
            spinner.finish_and_clear();
            match report.outcome {
                StepOutcome::Success => out.success(describe_decision(report.decision)),
                StepOutcome::Warning(reason) => {
                    out.warning(&reason);
                    warnings.push(reason);
                }
                StepOutcome::Fatal(message) => {
                    return Err(GantryError::RepoCloneFailed {
                        url: cfg.remote_url.clone(),
                        message,
                    });
                }
            }
        }

        if !warnings.is_empty() {
            out.warning(&format!(
                "launching with {} warning(s); functionality may be degraded",
                warnings.len()
            ));
        }

        // 6. Hand off and forward the child's exit status as our own.
        out.step(&format!("Launching {}", cfg.entry_point));
        let code = (ctx.spawn_app)(&cfg.interpreter, &cfg.entry_point, &cfg.local_path)?;
        Ok(code.unwrap_or(1))
    }
}

/// Human-readable summary of a successful reconciliation.
fn describe_decision(decision: UpdateDecision) -> &'static str {
    match decision {
        UpdateDecision::GitUnavailable => "update check skipped",
        UpdateDecision::NoRepository => "working copy cloned",
        UpdateDecision::UpToDate => "working copy up to date",
        UpdateDecision::UpdateAvailable => "working copy updated",
        UpdateDecision::FetchFailed => "using local copy as-is",
        UpdateDecision::PullFailed => "running pre-pull copy",
    }
}
