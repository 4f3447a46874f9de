//! telemetry/counters.rs
//! Live pool counters.
//!
//! Summary: Updated by `BoundedPool` on every get/put/close.
//! Converted into an immutable `PoolSnapshot` on demand.
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters shared by all callers of one pool.
#[derive(Debug, Default)]
pub struct PoolCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    created: AtomicU64,
    returns: AtomicU64,
    overflow_releases: AtomicU64,
    close_releases: AtomicU64,
    release_failures: AtomicU64,
}

impl PoolCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stored handle was handed out.
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// The store was empty.
    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// The factory manufactured a handle.
    #[inline]
    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    /// A handle went back into the store.
    #[inline]
    pub fn record_return(&self) {
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    /// A put found the store full and released the handle.
    #[inline]
    pub fn record_overflow(&self) {
        self.overflow_releases.fetch_add(1, Ordering::Relaxed);
    }

    /// A handle was released because the pool is closed, by a drain or a late put.
    #[inline]
    pub fn record_close_release(&self) {
        self.close_releases.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_release_failure(&self) {
        self.release_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    pub fn returns(&self) -> u64 {
        self.returns.load(Ordering::Relaxed)
    }

    pub fn overflow_releases(&self) -> u64 {
        self.overflow_releases.load(Ordering::Relaxed)
    }

    pub fn close_releases(&self) -> u64 {
        self.close_releases.load(Ordering::Relaxed)
    }

    pub fn release_failures(&self) -> u64 {
        self.release_failures.load(Ordering::Relaxed)
    }
}
