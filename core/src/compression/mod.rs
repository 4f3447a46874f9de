//! compression/mod.rs
//! Wire-payload compression for the protocol's codecs.
//!
//! Notes:
//! - Stateful decoders (gzip, LZ4, Zstd) are pooled and reset per payload.
//! - Snappy is decoded one-shot; `None` is the identity.
//! - The `Dispatcher` owns the pools; the free functions use a process-wide one.

pub mod codecs;
pub mod config;
pub mod constants;
pub mod registry;
pub mod types;

pub use config::*;
pub use constants::*;
pub use registry::*;
pub use types::*;
