//! CLI argument definitions.
//!
//! Gantry takes no required arguments: the launcher's configuration is
//! compiled-in constants (see [`crate::config`]). The flags here only adjust
//! output and let a user pin the working-copy location or skip the update
//! pass.

use clap::Parser;
use std::path::PathBuf;

/// Gantry - bootstrap-and-launch orchestrator for a self-updating chat application.
#[derive(Debug, Parser)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Working-copy directory (overrides the built-in default)
    #[arg(long, value_name = "DIR")]
    pub app_dir: Option<PathBuf>,

    /// Skip the self-update step and launch the local copy as-is
    #[arg(long)]
    pub no_update: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
