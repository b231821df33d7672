//! Global atomic counters for search activity.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (the CLI does this on exit).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters.
pub struct Metrics {
    searches_started: AtomicU64,
    searches_resolved: AtomicU64,
    searches_rejected: AtomicU64,
    searches_cancelled: AtomicU64,
    validation_failures: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            searches_started: AtomicU64::new(0),
            searches_resolved: AtomicU64::new(0),
            searches_rejected: AtomicU64::new(0),
            searches_cancelled: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
        }
    }

    pub fn inc_started(&self) {
        self.searches_started.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "searches_started", "counter incremented");
    }

    pub fn inc_resolved(&self) {
        self.searches_resolved.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "searches_resolved", "counter incremented");
    }

    pub fn inc_rejected(&self) {
        self.searches_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "searches_rejected", "counter incremented");
    }

    pub fn inc_cancelled(&self) {
        self.searches_cancelled.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "searches_cancelled", "counter incremented");
    }

    pub fn inc_validation_failures(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "validation_failures", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            searches_started = self.searches_started(),
            searches_resolved = self.searches_resolved(),
            searches_rejected = self.searches_rejected(),
            searches_cancelled = self.searches_cancelled(),
            validation_failures = self.validation_failures(),
        );
    }

    pub fn searches_started(&self) -> u64 {
        self.searches_started.load(Ordering::Relaxed)
    }

    pub fn searches_resolved(&self) -> u64 {
        self.searches_resolved.load(Ordering::Relaxed)
    }

    pub fn searches_rejected(&self) -> u64 {
        self.searches_rejected.load(Ordering::Relaxed)
    }

    pub fn searches_cancelled(&self) -> u64 {
        self.searches_cancelled.load(Ordering::Relaxed)
    }

    pub fn validation_failures(&self) -> u64 {
        self.validation_failures.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.searches_started.store(0, Ordering::Relaxed);
        self.searches_resolved.store(0, Ordering::Relaxed);
        self.searches_rejected.store(0, Ordering::Relaxed);
        self.searches_cancelled.store(0, Ordering::Relaxed);
        self.validation_failures.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        assert_eq!(m.searches_started(), 0);
        m.inc_started();
        m.inc_started();
        assert_eq!(m.searches_started(), 2);

        m.inc_resolved();
        m.inc_rejected();
        m.inc_rejected();
        m.inc_cancelled();
        m.inc_validation_failures();
        assert_eq!(m.searches_resolved(), 1);
        assert_eq!(m.searches_rejected(), 2);
        assert_eq!(m.searches_cancelled(), 1);
        assert_eq!(m.validation_failures(), 1);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_started();
        m.inc_resolved();
        m.inc_validation_failures();
        m.reset();
        assert_eq!(m.searches_started(), 0);
        assert_eq!(m.searches_resolved(), 0);
        assert_eq!(m.validation_failures(), 0);
    }
}
