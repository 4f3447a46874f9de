use std::time::Duration;

/// Default number of idle handles kept per codec pool.
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Growth increment for output accumulators (2 MiB).
/// Each reallocation adds at least this much spare capacity.
pub const DEFAULT_BUFFER_GROWTH: usize = 2 * 1024 * 1024;

/// First delay when a source reports `WouldBlock`.
pub const MIN_READ_BACKOFF: Duration = Duration::from_micros(1);
/// Upper bound for the doubling read backoff.
pub const MAX_READ_BACKOFF: Duration = Duration::from_millis(100);

/// Largest slice of spare capacity offered to a single `Read::read` call.
pub const MAX_READ_WINDOW: usize = 64 * 1024;
