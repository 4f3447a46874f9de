//! compression/codecs/mod.rs
//! Per-codec decode/encode paths.
//!
//! - gzip, lz4, zstd readers are `PooledDecoder`s, reset per payload.
//! - snappy is stateless and one-shot.

pub mod gzip;
pub mod lz4;
pub mod snappy;
pub mod zstd;

pub use gzip::GzipReader;
pub use lz4::Lz4Reader;
pub use zstd::{ZstdReader, ZstdWriter};
