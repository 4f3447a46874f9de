//! pool/mod.rs
//! Bounded, non-blocking pools of releasable handles.
//!
//! Responsibilities:
//! - Hand out and reclaim handles without unbounded growth
//! - Release overflow and everything left over at close
//!
//! Non-responsibilities:
//! - Fairness, priority, health checks
//! - Resizing

pub mod bounded;
pub mod guard;
pub mod types;

pub use bounded::BoundedPool;
pub use guard::Pooled;
pub use types::{Factory, PoolError, Release};
