//! codec-core
//!
//! Pooled decompression of wire-format message payloads.
//! Decoder contexts are expensive to build, so they live in bounded pools
//! and are reset per payload.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod utils;

pub mod buffer;
pub mod pool;
pub mod telemetry;

// Codec dispatch
pub mod compression;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::buffer::GrowableBuffer;
    pub use crate::compression::{
        compress, decompress, CompressionCodec, CompressionError, Dispatcher, DispatcherConfig,
    };
    pub use crate::pool::{BoundedPool, Pooled, Release};
}
