use std::ops::{Deref, DerefMut};

use crate::pool::bounded::BoundedPool;
use crate::pool::types::Release;

/// RAII borrow of a pool handle.
///
/// The handle is returned with `BoundedPool::put` when the guard drops, on
/// success and on every early `?` return alike.
pub struct Pooled<'a, T: Release> {
    item: Option<T>,
    pool: &'a BoundedPool<T>,
}

impl<'a, T: Release> Pooled<'a, T> {
    pub(crate) fn new(pool: &'a BoundedPool<T>, item: T) -> Self {
        Self { item: Some(item), pool }
    }

    /// Take the handle out; it will not be returned to the pool.
    pub fn detach(mut self) -> T {
        self.item.take().expect("pooled handle present until drop")
    }
}

impl<T: Release> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.item.as_ref().expect("pooled handle present until drop")
    }
}

impl<T: Release> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.item.as_mut().expect("pooled handle present until drop")
    }
}

impl<T: Release> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.put(item);
        }
    }
}
