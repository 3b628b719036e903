//! dirsync CLI
//!
//! Mirrors a source directory into a target directory, once or at a fixed
//! interval.

mod cli;
mod error;
mod logging;
mod scheduler;
mod settings;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use dirsync_core::{RootPair, SyncContext, SyncEngine};

use cli::Cli;
use error::Result;
use scheduler::Scheduler;
use settings::Settings;

fn main() {
    if let Err(e) = run() {
        tracing::error!(target: logging::FILE_ONLY_TARGET, "{}", e);
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli)?;

    logging::init(&settings.logfile, settings.verbose)?;
    log_startup(&settings);

    let roots = RootPair::new(&settings.source, &settings.target)?;
    let shutdown = scheduler::install_shutdown_flag()?;
    let engine = SyncEngine::new(SyncContext::new(roots).with_cancel_flag(shutdown.clone()));

    let scheduler = Scheduler::new(
        engine,
        Duration::from_secs(settings.interval_secs),
        settings.oneshot,
        shutdown,
    );
    scheduler.run();

    if scheduler.shutdown_requested() {
        tracing::info!("Shutting down");
    } else {
        tracing::info!("Done");
    }
    Ok(())
}

fn log_startup(settings: &Settings) {
    tracing::info!("======== Startup ========");
    tracing::info!("Using log file {}", settings.logfile.display());
    if settings.oneshot {
        tracing::info!("Running in one shot mode");
    } else {
        tracing::info!("Sync interval set to {} seconds", settings.interval_secs);
    }
    tracing::info!("Source path set: {}", settings.source.display());
    tracing::info!("Target path set: {}", settings.target.display());
}
