//! Console output for the bootstrap sequence.
//!
//! Diagnostics print as the steps execute; there are no silent failures.
//! The launcher runs headless-friendly by design, so this is a thin layer:
//! styled status lines plus a spinner for the long-running steps (installs,
//! clone/fetch/pull).

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::str::FromStr;
use std::time::Duration;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including step detail.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (warnings and the final status).
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Whether this mode shows per-step status lines.
    pub fn shows_steps(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Whether this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}

/// Output writer that respects the output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// A per-step status line.
    pub fn step(&self, msg: &str) {
        if self.mode.shows_steps() {
            println!("{} {}", style("→").cyan(), msg);
        }
    }

    /// A success line.
    pub fn success(&self, msg: &str) {
        if self.mode.shows_steps() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    /// A warning line. Shown in every mode; warnings are part of the
    /// no-silent-failures contract.
    pub fn warning(&self, msg: &str) {
        println!("{} {}", style("!").yellow().bold(), msg);
    }

    /// An error line, to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", style("✗").red().bold(), msg);
    }

    /// Start a spinner for a long-running step. Hidden when the mode
    /// suppresses spinners; callers finish it either way.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if !self.mode.shows_spinners() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }
}
