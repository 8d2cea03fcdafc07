//! Child process execution.
//!
//! Every external tool Gantry touches (pip, git, the application itself) goes
//! through this module. Commands are invoked directly as `program + args`
//! rather than through a shell, so there is no quoting surface and the PATH
//! the probe validated is the PATH that gets used.

use crate::error::{GantryError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a captured command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// The last non-empty stderr line, or a generic fallback.
    ///
    /// Tools like git and pip put the actionable message at the end of
    /// stderr; surfacing the whole stream in a diagnostic is just noise.
    pub fn brief_error(&self) -> String {
        self.stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("exited with code {:?}", self.exit_code))
    }
}

/// Render an argv for diagnostics.
fn render(program: &str, args: &[&str]) -> String {
    let mut cmd = program.to_string();
    for arg in args {
        cmd.push(' ');
        cmd.push_str(arg);
    }
    cmd
}

/// Run a command with captured output.
///
/// A non-zero exit is not an `Err` here; the caller inspects
/// [`CommandResult::success`]. Only a spawn failure (program missing,
/// permission denied) is an error.
pub fn run(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("running: {}", render(program, args));

    let output = cmd.output().map_err(|_| GantryError::CommandFailed {
        command: render(program, args),
        code: None,
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        duration: start.elapsed(),
        success: output.status.success(),
    })
}

/// Run an argv-style command and report only success/failure.
///
/// Spawn failures count as failure; this is the shape the installer and
/// orchestrator closures want.
pub fn run_argv(argv: &[String], cwd: Option<&Path>) -> bool {
    let Some((program, rest)) = argv.split_first() else {
        return false;
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    run(program, &args, cwd).map(|r| r.success).unwrap_or(false)
}

/// Run a command with inherited stdio and wait for it.
///
/// Used for the final application hand-off: the child owns the terminal and
/// its exit code is returned for pass-through. `None` means the child was
/// killed by a signal.
pub fn run_inherit(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<Option<i32>> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!("handing off to: {}", render(program, args));

    let status = cmd.status().map_err(|_| GantryError::CommandFailed {
        command: render(program, args),
        code: None,
    })?;

    Ok(status.code())
}
