//! telemetry/mod.rs
//! Pool telemetry: live atomic counters and immutable snapshots.
//!
//! Notes:
//! - Counters are updated on the get/put hot path with relaxed atomics only.
//! - Snapshots are plain data and serialize with serde.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
