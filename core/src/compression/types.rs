//! compression/types.rs
//! Codec ids, the unified compression error, and the pooled decoder contract.
use std::io;

use bytes::Bytes;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

use crate::compression::constants::codec_ids;
use crate::pool::{PoolError, Release};
use crate::utils::enum_name_or_raw;

/// Protocol compression codec.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum CompressionCodec {
    None   = codec_ids::NONE,
    Gzip   = codec_ids::GZIP,
    Snappy = codec_ids::SNAPPY,
    Lz4    = codec_ids::LZ4,
    Zstd   = codec_ids::ZSTD,
}

impl CompressionCodec {
    pub fn from_id(raw: u8) -> Result<Self, CompressionError> {
        Self::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionCodec::None   => "none",
            CompressionCodec::Gzip   => "gzip",
            CompressionCodec::Snappy => "snappy",
            CompressionCodec::Lz4    => "lz4",
            CompressionCodec::Zstd   => "zstd",
        }
    }

    /// Whether decoding goes through a pooled, reset-per-call decoder.
    pub fn is_pooled(self) -> bool {
        matches!(self, CompressionCodec::Gzip | CompressionCodec::Lz4 | CompressionCodec::Zstd)
    }
}

fn codec_name(raw: &u8) -> String {
    enum_name_or_raw::<CompressionCodec>(*raw)
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("invalid compression specified ({})", codec_name(.codec_id))]
    UnsupportedCodec { codec_id: u8 },

    /// Decoder/encoder could not be constructed or rebound to new input.
    #[error("codec {codec} init failed: {source}")]
    CodecInitFailed { codec: &'static str, source: io::Error },

    #[error("codec {codec} read failed: {source}")]
    CodecReadFailed { codec: &'static str, source: io::Error },

    #[error("codec {codec} write failed: {source}")]
    CodecWriteFailed { codec: &'static str, source: io::Error },

    /// Container-level validation failed (headers, trailers, framing).
    #[error("codec {codec} corrupt input: {msg}")]
    Corrupt { codec: &'static str, msg: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl CompressionError {
    pub(crate) fn init(codec: &'static str, source: io::Error) -> Self {
        CompressionError::CodecInitFailed { codec, source }
    }

    pub(crate) fn read(codec: &'static str, source: io::Error) -> Self {
        CompressionError::CodecReadFailed { codec, source }
    }

    pub(crate) fn write(codec: &'static str, source: io::Error) -> Self {
        CompressionError::CodecWriteFailed { codec, source }
    }

    pub(crate) fn corrupt(codec: &'static str, msg: impl Into<String>) -> Self {
        CompressionError::Corrupt { codec, msg: msg.into() }
    }
}

/// A reusable decoder held by a `BoundedPool`.
///
/// `open` is the expensive path taken on a pool miss. `reset` rebinds a pooled
/// decoder to a new payload without reallocating its internal state. A failed
/// `reset` leaves the handle fit to be pooled again.
pub trait PooledDecoder: Release<Error = CompressionError> + Send + Sized {
    const CODEC: CompressionCodec;

    fn open(payload: Bytes, growth: usize) -> Result<Self, CompressionError>;

    fn reset(&mut self, payload: Bytes) -> Result<(), CompressionError>;

    /// Decode the bound payload to completion. Partial output is discarded on error.
    fn decode(&mut self) -> Result<Bytes, CompressionError>;
}
