//! Termination detection for a self-feeding crawl
//!
//! Workers both consume and produce frontier entries, so an empty queue is
//! not a stop signal on its own. Instead a single outstanding-work counter is
//! kept:
//!
//! - it is incremented when a URL is admitted (the seed included, before any
//!   worker starts)
//! - it is decremented when a worker has finished the whole pipeline for a
//!   URL, after every child of that URL has already been admitted
//!
//! A child's increment and its parent's decrement are read-modify-writes on
//! the same atomic issued in that order by the same worker, so the counter
//! cannot reach zero while a child is about to be pushed. The caller whose
//! decrement moves the counter from one to zero is the only one told to shut
//! down.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Result of reporting one finished pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Other work is still outstanding
    Pending,
    /// This completion brought outstanding work to zero; the caller must close the frontier
    Quiescent,
}

/// Tracks outstanding work and detects quiescence
#[derive(Debug, Default)]
pub struct TerminationDetector {
    outstanding: AtomicUsize,
    admitted: AtomicU64,
    completed: AtomicU64,
    final_visited: OnceLock<u64>,
}

impl TerminationDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an admission
    ///
    /// Must be called before the admitted URL is pushed to the frontier.
    pub fn begin(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
        self.outstanding.fetch_add(1, Ordering::AcqRel);
    }

    /// Records the end of one pipeline run
    ///
    /// Uses a checked exchange on the counter: only the caller that observes
    /// the previous value `1` gets [`Completion::Quiescent`], and a decrement
    /// that would underflow is refused instead of wrapping.
    pub fn complete(&self) -> Completion {
        self.completed.fetch_add(1, Ordering::AcqRel);

        match self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(1) => {
                // Every other completion's increment is visible after the final decrement
                let _ = self.final_visited.set(self.completed.load(Ordering::Acquire));
                Completion::Quiescent
            }
            Ok(_) => Completion::Pending,
            Err(_) => {
                tracing::error!("Completion reported with no outstanding work");
                Completion::Pending
            }
        }
    }

    /// Undoes an admission whose URL never reached the frontier
    ///
    /// Never signals quiescence; shutdown has already happened if this runs.
    pub fn retract(&self) {
        let _ = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        self.admitted.fetch_sub(1, Ordering::Relaxed);
    }

    /// URLs admitted but not yet fully processed
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub fn is_quiescent(&self) -> bool {
        self.outstanding() == 0
    }

    /// Total admissions so far
    pub fn admitted(&self) -> u64 {
        self.admitted.load(Ordering::Relaxed)
    }

    /// Total completed pipeline runs so far
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Visited count recorded by the completion that reached quiescence
    pub fn final_visited(&self) -> Option<u64> {
        self.final_visited.get().copied()
    }
}
