//! Pass scheduling and shutdown handling

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use dirsync_core::{PassReport, SyncEngine};

/// How often a sleeping scheduler checks for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raise a shared flag on SIGINT or SIGTERM.
///
/// The same flag is handed to the engine as its cancellation flag, so a
/// signal stops the running pass at the next item and ends the loop.
pub fn install_shutdown_flag() -> std::io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&flag))?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&flag))?;
    Ok(flag)
}

/// Runs passes one after another, never two at once.
pub struct Scheduler {
    engine: SyncEngine,
    interval: Duration,
    oneshot: bool,
    shutdown: Arc<AtomicBool>,
}

impl Scheduler {
    pub fn new(
        engine: SyncEngine,
        interval: Duration,
        oneshot: bool,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            engine,
            interval,
            oneshot,
            shutdown,
        }
    }

    /// Run one pass, then keep running one every `interval` until shutdown.
    ///
    /// The interval is measured from the end of a pass. Returns the number
    /// of passes started.
    pub fn run(&self) -> usize {
        let mut passes = 0;
        loop {
            passes += 1;
            let report = self.engine.run_pass();
            log_totals(&report);

            if self.oneshot || self.shutdown_requested() {
                break;
            }
            tracing::debug!(seconds = self.interval.as_secs(), "Waiting for next pass");
            if self.wait(self.interval) {
                break;
            }
        }
        passes
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Sleep for `duration`; returns true if shutdown was requested meanwhile.
    fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        while !self.shutdown_requested() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep((deadline - now).min(POLL_INTERVAL));
        }
        true
    }
}

fn log_totals(report: &PassReport) {
    tracing::info!("Total new objects: {}", report.created + report.updated);
    tracing::info!("Total removed objects: {}", report.deleted);
    if report.mismatches > 0 {
        tracing::warn!("Copies failing verification: {}", report.mismatches);
    }
}
