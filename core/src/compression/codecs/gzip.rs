//! codecs/gzip.rs
//!
//! Pooled gzip decoding on top of a raw `flate2::Decompress` inflate state.
//!
//! Design notes:
//! - The inflate state (window + tables) is the expensive part; it is kept across
//!   payloads and cleared with `Decompress::reset`.
//! - Member headers (RFC 1952) are parsed here; `reset` fails on a bad first header.
//! - Every member's trailer CRC32 and ISIZE are checked. Concatenated members decode
//!   back to back.
use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;
use flate2::{write::GzEncoder, Compression, Decompress, FlushDecompress, Status};

use crate::buffer::GrowableBuffer;
use crate::compression::constants::{DEFAULT_LEVEL_GZIP, INFLATE_STEP};
use crate::compression::types::{CompressionCodec, CompressionError, PooledDecoder};
use crate::pool::Release;
use crate::utils::compute_crc32;

const CODEC: &str = "gzip";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const CM_DEFLATE: u8 = 8;
const HEADER_LEN: usize = 10;
const TRAILER_LEN: usize = 8;

const FHCRC: u8 = 0x02;
const FEXTRA: u8 = 0x04;
const FNAME: u8 = 0x08;
const FCOMMENT: u8 = 0x10;
const FRESERVED: u8 = 0xE0;

pub struct GzipReader {
    inflate: Decompress,
    input: Bytes,
    /// Offset of the next unread byte of `input`.
    pos: usize,
    out: GrowableBuffer,
}

impl PooledDecoder for GzipReader {
    const CODEC: CompressionCodec = CompressionCodec::Gzip;

    fn open(payload: Bytes, growth: usize) -> Result<Self, CompressionError> {
        let pos = parse_member_header(&payload).map_err(|e| CompressionError::init(CODEC, e))?;
        Ok(Self {
            inflate: Decompress::new(false),
            input: payload,
            pos,
            out: GrowableBuffer::new(growth),
        })
    }

    fn reset(&mut self, payload: Bytes) -> Result<(), CompressionError> {
        self.inflate.reset(false);
        self.out.clear();
        let pos = parse_member_header(&payload).map_err(|e| CompressionError::init(CODEC, e))?;
        self.input = payload;
        self.pos = pos;
        Ok(())
    }

    fn decode(&mut self) -> Result<Bytes, CompressionError> {
        match self.inflate_members() {
            Ok(()) => Ok(self.out.take()),
            Err(e) => {
                self.out.clear();
                Err(e)
            }
        }
    }
}

impl GzipReader {
    fn inflate_members(&mut self) -> Result<(), CompressionError> {
        loop {
            let member_start = self.out.len();
            self.inflate_body()?;
            self.check_trailer(member_start)?;

            if self.pos >= self.input.len() {
                return Ok(());
            }
            self.inflate.reset(false);
            let header_len = parse_member_header(&self.input[self.pos..])
                .map_err(|e| CompressionError::read(CODEC, e))?;
            self.pos += header_len;
        }
    }

    fn inflate_body(&mut self) -> Result<(), CompressionError> {
        let start_in = self.inflate.total_in();
        loop {
            let consumed = (self.inflate.total_in() - start_in) as usize;
            let input = &self.input[self.pos + consumed..];

            self.out.reserve(INFLATE_STEP);
            let before_in = self.inflate.total_in();
            let before_out = self.inflate.total_out();
            let status = self
                .inflate
                .decompress(input, self.out.spare_window(INFLATE_STEP), FlushDecompress::None)
                .map_err(|e| CompressionError::read(CODEC, e.into()))?;
            self.out.advance((self.inflate.total_out() - before_out) as usize);

            match status {
                Status::StreamEnd => {
                    self.pos += (self.inflate.total_in() - start_in) as usize;
                    return Ok(());
                }
                Status::Ok | Status::BufError => {
                    let progressed = self.inflate.total_in() != before_in
                        || self.inflate.total_out() != before_out;
                    if !progressed {
                        return Err(CompressionError::read(
                            CODEC,
                            io::Error::new(io::ErrorKind::UnexpectedEof, "truncated deflate stream"),
                        ));
                    }
                }
            }
        }
    }

    fn check_trailer(&mut self, member_start: usize) -> Result<(), CompressionError> {
        let trailer = self
            .input
            .get(self.pos..self.pos + TRAILER_LEN)
            .ok_or_else(|| CompressionError::corrupt(CODEC, "truncated member trailer"))?;
        let expected_crc = LittleEndian::read_u32(&trailer[0..4]);
        let expected_len = LittleEndian::read_u32(&trailer[4..8]);

        let member = &self.out.as_slice()[member_start..];
        let actual_crc = compute_crc32(member);
        if actual_crc != expected_crc {
            return Err(CompressionError::corrupt(
                CODEC,
                format!("crc32 mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"),
            ));
        }
        // ISIZE is the member length modulo 2^32
        if member.len() as u32 != expected_len {
            return Err(CompressionError::corrupt(
                CODEC,
                format!("size mismatch: trailer says {expected_len}, decoded {}", member.len()),
            ));
        }
        self.pos += TRAILER_LEN;
        Ok(())
    }
}

impl Release for GzipReader {
    type Error = CompressionError;

    fn release(self) -> Result<(), CompressionError> {
        Ok(())
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}

/// Parse one gzip member header; returns its length in bytes.
fn parse_member_header(data: &[u8]) -> io::Result<usize> {
    if data.len() < HEADER_LEN {
        return Err(invalid("truncated gzip header"));
    }
    if data[0..2] != GZIP_MAGIC {
        return Err(invalid("invalid gzip header"));
    }
    if data[2] != CM_DEFLATE {
        return Err(invalid("unsupported gzip compression method"));
    }
    let flags = data[3];
    if flags & FRESERVED != 0 {
        return Err(invalid("reserved gzip flags set"));
    }

    let mut pos = HEADER_LEN;
    if flags & FEXTRA != 0 {
        let xlen = data.get(pos..pos + 2).ok_or_else(|| invalid("truncated gzip extra field"))?;
        pos += 2 + LittleEndian::read_u16(xlen) as usize;
    }
    if flags & FNAME != 0 {
        pos = skip_zero_terminated(data, pos)?;
    }
    if flags & FCOMMENT != 0 {
        pos = skip_zero_terminated(data, pos)?;
    }
    if flags & FHCRC != 0 {
        let stored = data.get(pos..pos + 2).ok_or_else(|| invalid("truncated gzip header crc"))?;
        if LittleEndian::read_u16(stored) != (compute_crc32(&data[..pos]) & 0xffff) as u16 {
            return Err(invalid("gzip header crc mismatch"));
        }
        pos += 2;
    }
    if pos > data.len() {
        return Err(invalid("truncated gzip header"));
    }
    Ok(pos)
}

fn skip_zero_terminated(data: &[u8], pos: usize) -> io::Result<usize> {
    let rest = data.get(pos..).ok_or_else(|| invalid("truncated gzip header"))?;
    match rest.iter().position(|&b| b == 0) {
        Some(idx) => Ok(pos + idx + 1),
        None => Err(invalid("unterminated gzip header string")),
    }
}

/// One-shot gzip encode of a whole payload as a single member.
pub fn compress(input: &[u8], level: Option<i32>) -> Result<Vec<u8>, CompressionError> {
    let level = match level.unwrap_or(DEFAULT_LEVEL_GZIP) {
        l @ 0..=9 => Compression::new(l as u32),
        _ => Compression::default(),
    };
    let mut enc = GzEncoder::new(Vec::new(), level);
    enc.write_all(input).map_err(|e| CompressionError::write(CODEC, e))?;
    enc.finish().map_err(|e| CompressionError::write(CODEC, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_name_and_comment() {
        let mut data = vec![0x1f, 0x8b, 8, FNAME | FCOMMENT, 0, 0, 0, 0, 0, 0xff];
        data.extend_from_slice(b"file.txt\0");
        data.extend_from_slice(b"hi\0");
        assert_eq!(parse_member_header(&data).unwrap(), data.len());
    }

    #[test]
    fn header_rejects_bad_magic() {
        let data = [0u8; 12];
        assert!(parse_member_header(&data).is_err());
    }

    #[test]
    fn header_rejects_unterminated_name() {
        let mut data = vec![0x1f, 0x8b, 8, FNAME, 0, 0, 0, 0, 0, 0xff];
        data.extend_from_slice(b"no-terminator");
        assert!(parse_member_header(&data).is_err());
    }

    #[test]
    fn decoded_records_leave_spare_capacity_with_the_reader() {
        let growth = 1 << 20;
        let payload = Bytes::from(compress(b"eleven byte", None).unwrap());
        let mut reader = GzipReader::open(payload.clone(), growth).unwrap();

        let mut kept = Vec::new();
        for _ in 0..50 {
            reader.reset(payload.clone()).unwrap();
            let out = reader.decode().unwrap();
            assert_eq!(&out[..], b"eleven byte");
            kept.push(out);
        }
        assert_eq!(reader.out.reallocations(), 1);
        assert!(reader.out.capacity() >= growth);
    }
}
