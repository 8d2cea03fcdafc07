//! Gantry CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use gantry::cli::Cli;
use gantry::config::LauncherConfig;
use gantry::launcher::{default_context, LaunchOrchestrator};
use gantry::ui::{Output, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("gantry=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gantry=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Gantry starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut config = LauncherConfig::default();
    if let Some(dir) = cli.app_dir {
        config.local_path = dir;
    }
    config.skip_update = cli.no_update;

    let out = Output::new(output_mode);
    let orchestrator = LaunchOrchestrator::new(config);

    match orchestrator.run(&default_context(), &out) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            out.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
