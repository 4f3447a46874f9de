/// Protocol codec ids, as carried in the record batch attributes.
pub mod codec_ids {
    pub const NONE: u8   = 0;
    pub const GZIP: u8   = 1;
    pub const SNAPPY: u8 = 2;
    pub const LZ4: u8    = 3;
    pub const ZSTD: u8   = 4;
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_GZIP: i32 = 6;
pub const DEFAULT_LEVEL_ZSTD: i32 = 3;

/// Minimum spare room requested from the accumulator before each inflate step.
pub const INFLATE_STEP: usize = 32 * 1024;

/// xerial snappy-java stream framing.
pub const XERIAL_MAGIC: [u8; 8] = [0x82, b'S', b'N', b'A', b'P', b'P', b'Y', 0];
/// Magic plus two big-endian u32 version fields.
pub const XERIAL_HEADER_LEN: usize = 16;
pub const XERIAL_VERSION: u32 = 1;
pub const XERIAL_MIN_COMPAT_VERSION: u32 = 1;
/// Uncompressed block size used when producing xerial streams.
pub const XERIAL_BLOCK_SIZE: usize = 32 * 1024;
