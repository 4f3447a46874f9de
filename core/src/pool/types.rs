use std::fmt;

use thiserror::Error;

/// A pooled resource that must be explicitly released.
///
/// `release` frees whatever the handle owns (native contexts, large buffers).
/// A pool calls it exactly once for every handle it decides not to keep.
pub trait Release {
    type Error: fmt::Display;

    fn release(self) -> Result<(), Self::Error>;
}

/// Constructor invoked by `BoundedPool::get` when the store is empty.
pub type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool capacity must be at least 1")]
    ZeroCapacity,
}
