//! Progress reporting and cancellation

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Snapshot handed to a [`ProgressObserver`] before a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Zero-based index of the sweep about to run
    pub iteration: usize,
    pub aggregate_error: f64,
    pub increment: f64,
}

/// Receives periodic progress reports. Purely observational.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> ProgressObserver for F {
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressObserver for Silent {
    fn on_progress(&mut self, _progress: &Progress) {}
}

/// Observer that logs every report at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_progress(&mut self, progress: &Progress) {
        info!(
            "Iteration {}. Average error of {}. Increments of {}.",
            progress.iteration, progress.aggregate_error, progress.increment
        );
    }
}

/// Cooperative cancellation flag, checked once per iteration.
///
/// Clones share the same flag, so a host can keep one clone and hand the
/// other to the optimizer.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
