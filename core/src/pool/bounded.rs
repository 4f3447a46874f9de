//! pool/bounded.rs
//!
//! Capacity-bounded pool of releasable handles.
//!
//! Design notes:
//! - The store is a lock-free `ArrayQueue`; `get` is try-pop and `put` is try-push.
//! - A miss either manufactures through the factory or returns `None`. Nothing waits.
//! - A full store releases the incoming handle. Overflow is not an error.
//! - `close` is permanent. A `put` racing a `close` re-checks the flag after the push
//!   and drains, so no handle stays stranded in a closed store.

use std::fmt;
use std::sync::atomic::{fence, AtomicBool, Ordering};

use crossbeam::queue::ArrayQueue;
use log::{debug, warn};

use crate::pool::guard::Pooled;
use crate::pool::types::{Factory, PoolError, Release};
use crate::telemetry::{PoolCounters, PoolSnapshot};

pub struct BoundedPool<T: Release> {
    items: ArrayQueue<T>,
    factory: Option<Factory<T>>,
    closed: AtomicBool,
    counters: PoolCounters,
}

impl<T: Release> BoundedPool<T> {
    /// Create a pool holding at most `capacity` idle handles, with no factory.
    ///
    /// # Errors
    /// - `PoolError::ZeroCapacity` if `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        Self::build(capacity, None)
    }

    /// Create a pool that manufactures a handle with `factory` whenever `get` finds
    /// the store empty. Manufactured handles count against capacity only once put.
    pub fn with_factory<F>(capacity: usize, factory: F) -> Result<Self, PoolError>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::build(capacity, Some(Box::new(factory)))
    }

    fn build(capacity: usize, factory: Option<Factory<T>>) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::ZeroCapacity);
        }
        Ok(Self {
            items: ArrayQueue::new(capacity),
            factory,
            closed: AtomicBool::new(false),
            counters: PoolCounters::new(),
        })
    }

    /// Take an idle handle, or manufacture one, without blocking.
    ///
    /// Returns `None` when the pool is closed, or when the store is empty and
    /// no factory is configured.
    pub fn get(&self) -> Option<T> {
        if self.is_closed() {
            return None;
        }
        if let Some(item) = self.items.pop() {
            self.counters.record_hit();
            return Some(item);
        }
        self.counters.record_miss();

        let factory = self.factory.as_ref()?;
        self.counters.record_created();
        Some(factory())
    }

    /// Return a handle to the store without blocking.
    ///
    /// If the store is full, or the pool is closed, the handle is released instead.
    /// No ownership check is made: putting the same logical resource twice stores it twice.
    pub fn put(&self, item: T) {
        if self.is_closed() {
            self.counters.record_close_release();
            self.discard(item);
            return;
        }
        match self.items.push(item) {
            Ok(()) => {
                self.counters.record_return();
                fence(Ordering::SeqCst);
                if self.is_closed() {
                    // close() may have drained before our push landed
                    if let Err(e) = self.drain() {
                        warn!("release failed while draining closed pool: {e}");
                    }
                }
            }
            Err(item) => {
                debug!("pool full (capacity {}), releasing handle", self.items.capacity());
                self.counters.record_overflow();
                self.discard(item);
            }
        }
    }

    /// Scoped `get`: the handle goes back through `put` when the guard drops.
    pub fn checkout(&self) -> Option<Pooled<'_, T>> {
        self.get().map(|item| Pooled::new(self, item))
    }

    /// Wrap a handle built outside the pool so it is put back on drop.
    pub fn attach(&self, item: T) -> Pooled<'_, T> {
        Pooled::new(self, item)
    }

    /// Close the pool and release every stored handle.
    ///
    /// Draining always runs to completion; the first release error is returned.
    /// Calling `close` again is safe and only releases handles put in between.
    pub fn close(&self) -> Result<(), T::Error> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("closing pool with {} idle handle(s)", self.items.len());
        }
        fence(Ordering::SeqCst);
        self.drain()
    }

    fn drain(&self) -> Result<(), T::Error> {
        let mut first_err = None;
        while let Some(item) = self.items.pop() {
            self.counters.record_close_release();
            if let Err(e) = item.release() {
                self.counters.record_release_failure();
                if first_err.is_none() {
                    first_err = Some(e);
                } else {
                    warn!("additional release failure during close: {e}");
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn discard(&self, item: T) {
        if let Err(e) = item.release() {
            self.counters.record_release_failure();
            warn!("failed to release discarded handle: {e}");
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of idle handles currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    pub fn stats(&self) -> PoolSnapshot {
        PoolSnapshot::from(&self.counters, self.capacity(), self.len(), self.is_closed())
    }
}

impl<T: Release> Drop for BoundedPool<T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("release failed while dropping pool: {e}");
        }
    }
}

impl<T: Release> fmt::Debug for BoundedPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedPool")
            .field("capacity", &self.capacity())
            .field("idle", &self.len())
            .field("closed", &self.is_closed())
            .field("has_factory", &self.has_factory())
            .finish()
    }
}
