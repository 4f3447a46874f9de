//! src/compression/codecs/zstd.rs
//!
//! Pooled Zstd decoding and encoding.
//!
//! Design notes:
//! - `ZstdReader` owns a `zstd_safe::DCtx` and a scratch accumulator. Both survive
//!   across payloads; the context is reset per session and the scratch is cleared.
//! - Decoded bytes are split off the scratch; the reader keeps only the spare
//!   capacity, so a returned record is never written to again.
//! - Concatenated frames decode back to back; input that ends mid-frame is an error.
//! - `ZstdWriter` wraps a `zstd::bulk::Compressor`, which always emits a frame,
//!   even for empty input.
use std::io;

use bytes::Bytes;
use log::warn;
use zstd_safe::{DCtx, InBuffer, OutBuffer, ResetDirective};

use crate::buffer::GrowableBuffer;
use crate::compression::constants::DEFAULT_LEVEL_ZSTD;
use crate::compression::types::{CompressionCodec, CompressionError, PooledDecoder};
use crate::pool::Release;

const CODEC: &str = "zstd";

fn zstd_error(code: zstd_safe::ErrorCode) -> io::Error {
    io::Error::new(io::ErrorKind::Other, zstd_safe::get_error_name(code))
}

/// Zstd streaming decoder handle.
pub struct ZstdReader {
    dctx: DCtx<'static>,
    input: Bytes,
    scratch: GrowableBuffer,
}

impl PooledDecoder for ZstdReader {
    const CODEC: CompressionCodec = CompressionCodec::Zstd;

    fn open(payload: Bytes, growth: usize) -> Result<Self, CompressionError> {
        let dctx = DCtx::try_create().ok_or_else(|| {
            CompressionError::init(
                CODEC,
                io::Error::new(io::ErrorKind::OutOfMemory, "failed to allocate decompression context"),
            )
        })?;
        Ok(Self { dctx, input: payload, scratch: GrowableBuffer::new(growth) })
    }

    fn reset(&mut self, payload: Bytes) -> Result<(), CompressionError> {
        self.scratch.clear();
        self.dctx
            .reset(ResetDirective::SessionOnly)
            .map_err(|code| CompressionError::init(CODEC, zstd_error(code)))?;
        self.input = payload;
        Ok(())
    }

    fn decode(&mut self) -> Result<Bytes, CompressionError> {
        self.scratch.clear();
        let result = stream_frames(&mut self.dctx, &self.input, &mut self.scratch).map(|()| self.scratch.take());
        if result.is_err() {
            self.scratch.clear();
            // drop any half-decoded frame so the context is clean for the next caller
            if let Err(code) = self.dctx.reset(ResetDirective::SessionOnly) {
                warn!("zstd context reset after failed decode: {}", zstd_safe::get_error_name(code));
            }
        }
        result
    }
}

/// Drive `dctx` over `src` until every frame is decoded and flushed.
fn stream_frames(dctx: &mut DCtx<'static>, src: &[u8], out: &mut GrowableBuffer) -> Result<(), CompressionError> {
    let step = DCtx::out_size();
    let mut input = InBuffer::around(src);
    // 0 when no frame is in flight
    let mut hint = 0;

    loop {
        if input.pos >= src.len() && hint == 0 {
            return Ok(());
        }

        out.reserve(step);
        let before_in = input.pos;
        let wrote = {
            let mut output = OutBuffer::around(out.spare_window(step));
            hint = dctx
                .decompress_stream(&mut output, &mut input)
                .map_err(|code| CompressionError::read(CODEC, zstd_error(code)))?;
            output.pos()
        };
        out.advance(wrote);

        if wrote == 0 && input.pos == before_in {
            return Err(CompressionError::corrupt(CODEC, "truncated frame"));
        }
    }
}

impl Release for ZstdReader {
    type Error = CompressionError;

    fn release(self) -> Result<(), CompressionError> {
        Ok(())
    }
}

/// Zstd encoder handle for the writer pool.
pub struct ZstdWriter {
    compressor: zstd::bulk::Compressor<'static>,
    level: i32,
}

impl ZstdWriter {
    pub fn new(level: Option<i32>) -> Result<Self, CompressionError> {
        let level = level.unwrap_or(DEFAULT_LEVEL_ZSTD);
        let compressor = zstd::bulk::Compressor::new(level).map_err(|e| CompressionError::init(CODEC, e))?;
        Ok(Self { compressor, level })
    }

    /// Rebind to `level`; a no-op when the level is unchanged.
    pub fn reset(&mut self, level: Option<i32>) -> Result<(), CompressionError> {
        let level = level.unwrap_or(DEFAULT_LEVEL_ZSTD);
        if level != self.level {
            self.compressor
                .set_compression_level(level)
                .map_err(|e| CompressionError::init(CODEC, e))?;
            self.level = level;
        }
        Ok(())
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        self.compressor.compress(input).map_err(|e| CompressionError::write(CODEC, e))
    }
}

impl Release for ZstdWriter {
    type Error = CompressionError;

    fn release(self) -> Result<(), CompressionError> {
        Ok(())
    }
}
