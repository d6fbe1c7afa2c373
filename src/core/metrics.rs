//! Observability counters for the delivery pipeline
//!
//! Loss anywhere in the pipeline is bounded and must be observable; these
//! counters are the observation point, for tests and for operators.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the emitting threads and the dispatcher.
#[derive(Debug, Default)]
pub struct LogMetrics {
    /// Records accepted onto the queue.
    enqueued: AtomicU64,

    /// Records fanned out to the registry without any sink error.
    delivered: AtomicU64,

    /// Records that failed on at least one sink, or were lost to a failed
    /// rotation.
    dropped: AtomicU64,

    /// Emit calls that had to wait for queue space (backpressure).
    blocked: AtomicU64,

    /// Emit calls rejected after close.
    rejected: AtomicU64,
}

impl LogMetrics {
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            blocked: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn blocked(&self) -> u64 {
        self.blocked.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_blocked(&self) -> u64 {
        self.blocked.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.enqueued.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.blocked.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }
}

impl Clone for LogMetrics {
    /// Snapshot of the current values.
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            delivered: AtomicU64::new(self.delivered()),
            dropped: AtomicU64::new(self.dropped()),
            blocked: AtomicU64::new(self.blocked()),
            rejected: AtomicU64::new(self.rejected()),
        }
    }
}
