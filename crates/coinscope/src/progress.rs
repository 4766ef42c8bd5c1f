//! Liveness feedback while fetches are in flight.
//!
//! The orchestrator calls [`Progress::tick`] on a fixed interval until every
//! fetch has finished, then [`Progress::finish`] exactly once. Implementations
//! must return quickly: a tick runs on the same task that detects completion.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Receiver of progress ticks.
pub trait Progress: Send + Sync {
    fn tick(&self);
    fn finish(&self);
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn tick(&self) {}
    fn finish(&self) {}
}

/// Counts ticks; useful for tests and for logging how long a search spun.
#[derive(Debug, Default)]
pub struct TickCounter {
    ticks: AtomicUsize,
    finished: AtomicBool,
}

impl TickCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> usize {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }
}

impl Progress for TickCounter {
    fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::Relaxed);
    }
}
