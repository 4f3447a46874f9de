//! codecs/snappy.rs
//! Stateless Snappy decode/encode.
//!
//! Accepts both raw snappy blocks and the xerial snappy-java stream framing
//! (magic, two version words, then length-prefixed raw blocks).
use std::io;

use byteorder::{BigEndian, ByteOrder};
use snap::raw::{Decoder, Encoder};

use crate::compression::constants::{
    XERIAL_BLOCK_SIZE, XERIAL_HEADER_LEN, XERIAL_MAGIC, XERIAL_MIN_COMPAT_VERSION, XERIAL_VERSION,
};
use crate::compression::types::CompressionError;

const CODEC: &str = "snappy";

fn snap_error(e: snap::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

pub fn is_xerial(src: &[u8]) -> bool {
    src.len() >= XERIAL_HEADER_LEN && src[..XERIAL_MAGIC.len()] == XERIAL_MAGIC
}

/// One-shot decode of a raw block or a xerial stream.
pub fn decompress(src: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut decoder = Decoder::new();
    if !is_xerial(src) {
        return decoder.decompress_vec(src).map_err(|e| CompressionError::read(CODEC, snap_error(e)));
    }

    let mut out = Vec::new();
    let mut pos = XERIAL_HEADER_LEN;
    while pos < src.len() {
        let len_bytes = src
            .get(pos..pos + 4)
            .ok_or_else(|| CompressionError::corrupt(CODEC, "truncated xerial block length"))?;
        let block_len = BigEndian::read_u32(len_bytes) as usize;
        pos += 4;

        let block = src
            .get(pos..pos + block_len)
            .ok_or_else(|| CompressionError::corrupt(CODEC, format!("xerial block of {block_len} bytes overruns input")))?;
        let decoded = decoder
            .decompress_vec(block)
            .map_err(|e| CompressionError::read(CODEC, snap_error(e)))?;
        out.extend_from_slice(&decoded);
        pos += block_len;
    }
    Ok(out)
}

/// Encode as a single raw snappy block.
pub fn compress(src: &[u8]) -> Result<Vec<u8>, CompressionError> {
    Encoder::new()
        .compress_vec(src)
        .map_err(|e| CompressionError::write(CODEC, snap_error(e)))
}

/// Encode as a xerial stream of `XERIAL_BLOCK_SIZE` blocks.
pub fn compress_xerial(src: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut encoder = Encoder::new();
    let mut out = Vec::with_capacity(XERIAL_HEADER_LEN + snap::raw::max_compress_len(src.len()));
    out.extend_from_slice(&XERIAL_MAGIC);

    let mut word = [0u8; 4];
    BigEndian::write_u32(&mut word, XERIAL_VERSION);
    out.extend_from_slice(&word);
    BigEndian::write_u32(&mut word, XERIAL_MIN_COMPAT_VERSION);
    out.extend_from_slice(&word);

    for chunk in src.chunks(XERIAL_BLOCK_SIZE) {
        let block = encoder
            .compress_vec(chunk)
            .map_err(|e| CompressionError::write(CODEC, snap_error(e)))?;
        BigEndian::write_u32(&mut word, block.len() as u32);
        out.extend_from_slice(&word);
        out.extend_from_slice(&block);
    }
    Ok(out)
}
