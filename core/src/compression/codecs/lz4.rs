//! codecs/lz4.rs
//! LZ4 frame decoding with a reusable `lz4_flex` frame decoder.
//!
//! The frame decoder keeps its block buffers between payloads; `reset` swaps the
//! source underneath it. A decoder that failed mid-frame is marked dirty and is
//! rebuilt on its next `reset` instead of being rebound.
use std::io::{self, Cursor, Write};

use bytes::Bytes;
use lz4_flex::frame::{FrameDecoder, FrameEncoder};

use crate::buffer::GrowableBuffer;
use crate::compression::types::{CompressionCodec, CompressionError, PooledDecoder};
use crate::pool::Release;

const CODEC: &str = "lz4";

pub struct Lz4Reader {
    decoder: FrameDecoder<Cursor<Bytes>>,
    dirty: bool,
    out: GrowableBuffer,
}

impl Lz4Reader {
    /// Whether the last decode failed and the frame state must be rebuilt.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl PooledDecoder for Lz4Reader {
    const CODEC: CompressionCodec = CompressionCodec::Lz4;

    fn open(payload: Bytes, growth: usize) -> Result<Self, CompressionError> {
        Ok(Self {
            decoder: FrameDecoder::new(Cursor::new(payload)),
            dirty: false,
            out: GrowableBuffer::new(growth),
        })
    }

    fn reset(&mut self, payload: Bytes) -> Result<(), CompressionError> {
        self.out.clear();
        if self.dirty {
            self.decoder = FrameDecoder::new(Cursor::new(payload));
            self.dirty = false;
        } else {
            *self.decoder.get_mut() = Cursor::new(payload);
        }
        Ok(())
    }

    fn decode(&mut self) -> Result<Bytes, CompressionError> {
        match self.out.read_from(&mut self.decoder) {
            Ok(_) => Ok(self.out.take()),
            Err(e) => {
                self.dirty = true;
                self.out.clear();
                Err(CompressionError::read(CODEC, e))
            }
        }
    }
}

impl Release for Lz4Reader {
    type Error = CompressionError;

    fn release(self) -> Result<(), CompressionError> {
        Ok(())
    }
}

/// Encode `input` as a single LZ4 frame.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut enc = FrameEncoder::new(Vec::new());
    enc.write_all(input).map_err(|e| CompressionError::write(CODEC, e))?;
    enc.finish()
        .map_err(|e| CompressionError::write(CODEC, io::Error::new(io::ErrorKind::Other, e.to_string())))
}
