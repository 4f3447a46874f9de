//! telemetry/snapshot.rs
//!
//! Immutable views over pool counters.
//!
//! Design notes:
//! - `PoolSnapshot` is a point-in-time copy; counters keep moving underneath.
//! - `DispatcherSnapshot` groups the four codec pools owned by a `Dispatcher`.
//! - Both serialize with serde so callers can ship them to their own metrics sink.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::PoolCounters;

/// Point-in-time pool statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub capacity: usize,
    pub idle: usize,
    pub closed: bool,
    pub hits: u64,
    pub misses: u64,
    pub created: u64,
    pub returns: u64,
    pub overflow_releases: u64,
    pub close_releases: u64,
    pub release_failures: u64,
}

impl PoolSnapshot {
    pub fn from(counters: &PoolCounters, capacity: usize, idle: usize, closed: bool) -> Self {
        Self {
            capacity,
            idle,
            closed,
            hits: counters.hits(),
            misses: counters.misses(),
            created: counters.created(),
            returns: counters.returns(),
            overflow_releases: counters.overflow_releases(),
            close_releases: counters.close_releases(),
            release_failures: counters.release_failures(),
        }
    }

    /// Total handles released by this pool, whether on overflow or on close.
    pub fn total_releases(&self) -> u64 {
        self.overflow_releases + self.close_releases
    }

    /// Fraction of `get` calls served from the store.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // Bookkeeping invariants that hold for any quiescent pool.
    pub fn sanity_check(&self) -> bool {
        self.idle <= self.capacity
            && self.created <= self.misses
            && self.release_failures <= self.total_releases()
    }
}

/// Statistics for every pool owned by a dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherSnapshot {
    pub gzip_readers: PoolSnapshot,
    pub lz4_readers: PoolSnapshot,
    pub zstd_readers: PoolSnapshot,
    pub zstd_writers: PoolSnapshot,
}

impl DispatcherSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn total_idle(&self) -> usize {
        self.gzip_readers.idle + self.lz4_readers.idle + self.zstd_readers.idle + self.zstd_writers.idle
    }
}
