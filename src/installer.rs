//! Dependency installation and package-manager remediation.
//!
//! Installs the declared packages in order through the interpreter's package
//! manager, stopping at the first failure. Installs are idempotent at the
//! package level (`--upgrade` on an already-current package is a no-op
//! success) but deliberately not transactional: packages installed before a
//! failure stay installed, since a partial environment is still closer to
//! usable than none.
//!
//! Command execution is injected as a closure so tests never touch the host
//! package state.

use crate::outcome::StepOutcome;
use crate::probe::Environment;

/// Mockable command runner: full argv in, success out.
pub type CommandRunner<'a> = &'a dyn Fn(&[String]) -> bool;

/// Argv for installing/upgrading one package via `interpreter -m pip`.
///
/// Going through `-m pip` instead of the bare `pip` binary keeps the install
/// tied to the interpreter that was actually probed.
fn install_argv(interpreter: &str, package: &str) -> Vec<String> {
    vec![
        interpreter.to_string(),
        "-m".to_string(),
        "pip".to_string(),
        "install".to_string(),
        "--upgrade".to_string(),
        package.to_string(),
    ]
}

/// Argv for the one-shot package-manager bootstrap.
fn ensurepip_argv(interpreter: &str) -> Vec<String> {
    vec![
        interpreter.to_string(),
        "-m".to_string(),
        "ensurepip".to_string(),
        "--upgrade".to_string(),
    ]
}

/// Install every package in declared order, halting at the first failure.
///
/// Packages that succeed are recorded in `env.installed_packages`. On the
/// first failing package the whole step is `Fatal`; later packages are never
/// attempted.
pub fn install_all(
    interpreter: &str,
    packages: &[String],
    env: &mut Environment,
    run: CommandRunner<'_>,
) -> StepOutcome {
    for package in packages {
        tracing::info!("installing {}", package);
        if run(&install_argv(interpreter, package)) {
            env.installed_packages.insert(package.clone());
        } else {
            return StepOutcome::Fatal(format!("failed to install {package}"));
        }
    }
    StepOutcome::Success
}

/// Make sure the package manager is available, bootstrapping it once if not.
///
/// If the initial probe misses, `interpreter -m ensurepip --upgrade` is run
/// as a best-effort self-install, then the probe is repeated exactly once.
/// A `Warning` outcome means the bootstrap was needed and worked; callers
/// still proceed either way except on `Fatal`.
pub fn ensure_package_manager(
    interpreter: &str,
    manager: &str,
    probe: &dyn Fn(&str) -> bool,
    run: CommandRunner<'_>,
) -> StepOutcome {
    if probe(manager) {
        return StepOutcome::Success;
    }

    tracing::warn!("{} not found, attempting ensurepip bootstrap", manager);
    let bootstrapped = run(&ensurepip_argv(interpreter));

    if bootstrapped && probe(manager) {
        StepOutcome::Warning(format!("{manager} was missing and has been bootstrapped"))
    } else {
        StepOutcome::Fatal(format!(
            "{manager} not found and ensurepip bootstrap failed"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn env() -> Environment {
        Environment::default()
    }

    #[test]
    fn installs_packages_in_declared_order() {
        let calls = RefCell::new(Vec::new());
        let run = |argv: &[String]| {
            calls.borrow_mut().push(argv.last().unwrap().clone());
            true
        };

        let packages: Vec<String> = ["PyQt5", "GitPython", "requests"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut env = env();
        let outcome = install_all("python3", &packages, &mut env, &run);

        assert_eq!(outcome, StepOutcome::Success);
        assert_eq!(*calls.borrow(), vec!["PyQt5", "GitPython", "requests"]);
        assert_eq!(env.installed_packages.len(), 3);
    }

    #[test]
    fn halts_at_first_failure_and_never_attempts_later_packages() {
        let calls = RefCell::new(Vec::new());
        let run = |argv: &[String]| {
            let pkg = argv.last().unwrap().clone();
            calls.borrow_mut().push(pkg.clone());
            pkg != "B"
        };

        let packages: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let mut env = env();
        let outcome = install_all("python3", &packages, &mut env, &run);

        assert_eq!(outcome, StepOutcome::Fatal("failed to install B".into()));
        // C is never attempted
        assert_eq!(*calls.borrow(), vec!["A", "B"]);
        // A stays installed; no rollback
        assert!(env.installed_packages.contains("A"));
        assert!(!env.installed_packages.contains("B"));
        assert!(!env.installed_packages.contains("C"));
    }

    #[test]
    fn empty_dependency_list_is_success() {
        let run = |_: &[String]| panic!("no command should run");
        let mut env = env();
        assert_eq!(
            install_all("python3", &[], &mut env, &run),
            StepOutcome::Success
        );
    }

    #[test]
    fn install_argv_goes_through_interpreter_module() {
        let argv = install_argv("python3", "requests");
        assert_eq!(
            argv,
            vec!["python3", "-m", "pip", "install", "--upgrade", "requests"]
        );
    }

    #[test]
    fn package_manager_present_needs_no_remediation() {
        let run = |_: &[String]| panic!("no bootstrap should run");
        let outcome = ensure_package_manager("python3", "pip3", &|_| true, &run);
        assert_eq!(outcome, StepOutcome::Success);
    }

    #[test]
    fn package_manager_bootstrap_succeeds_and_reprobes_once() {
        let probes = RefCell::new(0);
        let ran_bootstrap = RefCell::new(false);

        let probe = |_: &str| {
            *probes.borrow_mut() += 1;
            // Missing on first probe, present after bootstrap
            *probes.borrow() > 1
        };
        let run = |argv: &[String]| {
            assert!(argv.contains(&"ensurepip".to_string()));
            *ran_bootstrap.borrow_mut() = true;
            true
        };

        let outcome = ensure_package_manager("python3", "pip3", &probe, &run);
        assert!(outcome.is_warning());
        assert!(*ran_bootstrap.borrow());
        assert_eq!(*probes.borrow(), 2);
    }

    #[test]
    fn package_manager_bootstrap_failure_is_fatal() {
        let outcome = ensure_package_manager("python3", "pip3", &|_| false, &|_| false);
        assert!(matches!(outcome, StepOutcome::Fatal(_)));
    }

    #[test]
    fn package_manager_still_missing_after_bootstrap_is_fatal() {
        // ensurepip claims success but the re-probe still misses
        let outcome = ensure_package_manager("python3", "pip3", &|_| false, &|_| true);
        assert!(matches!(outcome, StepOutcome::Fatal(_)));
    }
}
