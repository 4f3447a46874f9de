//! buffer.rs
//! Append-only output accumulator for streaming decoders.
//!
//! Growth rule: an append of `n` bytes that does not fit in spare capacity
//! reallocates to `len + n + growth`, so the number of reallocations stays small
//! even when the source hands out one byte at a time.
//!
//! Storage is a `BytesMut`. `take` splits the contents off as `Bytes` and the
//! spare capacity stays here for the next decode. Bytes past the contents that
//! were zeroed for an earlier read stay initialised, so each byte of storage is
//! zeroed at most once.
use std::io::{self, Read, Write};
use std::thread;

use bytes::{Bytes, BytesMut};

use crate::constants::{DEFAULT_BUFFER_GROWTH, MAX_READ_BACKOFF, MAX_READ_WINDOW, MIN_READ_BACKOFF};

#[derive(Debug, Clone)]
pub struct GrowableBuffer {
    /// `buf.len()` is the initialised high-water mark, not the contents.
    buf: BytesMut,
    filled: usize,
    growth: usize,
    reallocations: usize,
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_GROWTH)
    }
}

impl GrowableBuffer {
    /// Create an empty buffer. No storage is allocated until the first write.
    pub fn new(growth: usize) -> Self {
        Self { buf: BytesMut::new(), filled: 0, growth, reallocations: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn spare_capacity(&self) -> usize {
        self.buf.capacity() - self.filled
    }

    pub fn growth(&self) -> usize {
        self.growth
    }

    /// How many times the buffer had to grow.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// Make room for at least `n` more bytes, following the growth rule.
    pub fn reserve(&mut self, n: usize) {
        if self.spare_capacity() < n {
            self.grow(n + self.growth);
        }
    }

    fn grow(&mut self, additional: usize) {
        // stale bytes past the contents are not worth carrying into new storage
        self.buf.truncate(self.filled);
        self.buf.reserve(additional);
        self.reallocations += 1;
    }

    /// Writable window of up to `max` bytes right after the contents.
    ///
    /// The window never extends past spare capacity; call `reserve` first.
    /// Only storage that was never handed out before is zeroed.
    pub(crate) fn spare_window(&mut self, max: usize) -> &mut [u8] {
        let end = self.filled + max.min(self.spare_capacity());
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        &mut self.buf[self.filled..end]
    }

    /// Mark `n` bytes of the last `spare_window` as written.
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.filled + n <= self.buf.len());
        self.filled = (self.filled + n).min(self.buf.len());
    }

    /// Append `src`, growing if it does not fit in spare capacity.
    pub fn extend_from_slice(&mut self, src: &[u8]) {
        self.reserve(src.len());
        self.spare_window(src.len()).copy_from_slice(src);
        self.advance(src.len());
    }

    /// Read `r` to end of stream, appending everything it yields.
    ///
    /// Each read is offered at most `MAX_READ_WINDOW` bytes of spare capacity.
    /// `Ok(0)` ends the stream. `Interrupted` is retried at once. `WouldBlock` means
    /// the source had nothing yet: the read is retried after a delay that doubles
    /// from `MIN_READ_BACKOFF` up to `MAX_READ_BACKOFF` and resets on any progress.
    /// On error, bytes appended by this call are kept; callers discard the buffer.
    pub fn read_from<R: Read + ?Sized>(&mut self, r: &mut R) -> io::Result<usize> {
        let mut total = 0;
        let mut backoff = MIN_READ_BACKOFF;
        loop {
            if self.spare_capacity() == 0 {
                self.grow(self.growth.max(1));
            }

            match r.read(self.spare_window(MAX_READ_WINDOW)) {
                Ok(0) => return Ok(total),
                Ok(n) => {
                    self.advance(n);
                    total += n;
                    backoff = MIN_READ_BACKOFF;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(backoff);
                    backoff = (backoff * 2).min(MAX_READ_BACKOFF);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Hand the accumulated bytes to the caller, leaving the buffer empty.
    ///
    /// Only the contents move; spare capacity is kept for the next write.
    pub fn take(&mut self) -> Bytes {
        let out = self.buf.split_to(self.filled).freeze();
        self.filled = 0;
        out
    }

    /// Forget the contents but keep the storage for the next decode.
    pub fn clear(&mut self) {
        self.filled = 0;
    }
}

impl Write for GrowableBuffer {
    fn write(&mut self, src: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(src);
        Ok(src.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
