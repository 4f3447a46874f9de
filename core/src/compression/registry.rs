//! compression/registry.rs
//! Codec dispatch: routes a (codec id, payload) pair to its decode/encode path.

use std::sync::OnceLock;

use bytes::Bytes;
use log::debug;

use crate::compression::codecs::{gzip, lz4, snappy, GzipReader, Lz4Reader, ZstdReader, ZstdWriter};
use crate::compression::config::DispatcherConfig;
use crate::compression::types::{CompressionCodec, CompressionError, PooledDecoder};
use crate::pool::BoundedPool;
use crate::telemetry::DispatcherSnapshot;

/// Owns one bounded pool per stateful codec.
///
/// Pools have no factory: on a miss the dispatcher opens a fresh handle itself,
/// because opening can fail and needs the payload. The fresh handle is attached
/// to the pool and recycled when the call ends.
#[derive(Debug)]
pub struct Dispatcher {
    config: DispatcherConfig,
    gzip_readers: BoundedPool<GzipReader>,
    lz4_readers: BoundedPool<Lz4Reader>,
    zstd_readers: BoundedPool<ZstdReader>,
    zstd_writers: BoundedPool<ZstdWriter>,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Result<Self, CompressionError> {
        config.validate()?;
        Ok(Self {
            gzip_readers: BoundedPool::new(config.gzip_readers)?,
            lz4_readers: BoundedPool::new(config.lz4_readers)?,
            zstd_readers: BoundedPool::new(config.zstd_readers)?,
            zstd_writers: BoundedPool::new(config.zstd_writers)?,
            config,
        })
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Decode `payload` compressed with codec `codec_id`.
    ///
    /// `None` hands back the same storage. Unknown ids fail before any pool is touched.
    pub fn decompress(&self, codec_id: u8, payload: Bytes) -> Result<Bytes, CompressionError> {
        match CompressionCodec::from_id(codec_id)? {
            CompressionCodec::None => Ok(payload),
            CompressionCodec::Snappy => snappy::decompress(&payload).map(Bytes::from),
            CompressionCodec::Gzip => self.decode_pooled(&self.gzip_readers, payload),
            CompressionCodec::Lz4 => self.decode_pooled(&self.lz4_readers, payload),
            CompressionCodec::Zstd => self.decode_pooled(&self.zstd_readers, payload),
        }
    }

    fn decode_pooled<D: PooledDecoder>(&self, pool: &BoundedPool<D>, payload: Bytes) -> Result<Bytes, CompressionError> {
        // the guard puts the decoder back on every exit path, reset failure included
        let mut decoder = match pool.checkout() {
            Some(mut decoder) => {
                decoder.reset(payload)?;
                decoder
            }
            None => {
                debug!("{} pool miss, opening fresh decoder", D::CODEC.name());
                pool.attach(D::open(payload, self.config.buffer_growth)?)
            }
        };
        decoder.decode()
    }

    /// Encode `payload` with codec `codec_id`. `level` falls back to the codec default.
    pub fn compress(&self, codec_id: u8, payload: &[u8], level: Option<i32>) -> Result<Bytes, CompressionError> {
        let encoded = match CompressionCodec::from_id(codec_id)? {
            CompressionCodec::None => return Ok(Bytes::copy_from_slice(payload)),
            CompressionCodec::Gzip => gzip::compress(payload, level)?,
            CompressionCodec::Snappy => snappy::compress(payload)?,
            CompressionCodec::Lz4 => lz4::compress(payload)?,
            CompressionCodec::Zstd => {
                let mut writer = match self.zstd_writers.checkout() {
                    Some(mut writer) => {
                        writer.reset(level)?;
                        writer
                    }
                    None => self.zstd_writers.attach(ZstdWriter::new(level)?),
                };
                writer.compress(payload)?
            }
        };
        Ok(Bytes::from(encoded))
    }

    /// Close every pool, releasing idle handles. Calls made afterwards still
    /// work but no longer reuse handles.
    pub fn close(&self) -> Result<(), CompressionError> {
        let results = [
            self.gzip_readers.close(),
            self.lz4_readers.close(),
            self.zstd_readers.close(),
            self.zstd_writers.close(),
        ];
        results.into_iter().collect()
    }

    pub fn stats(&self) -> DispatcherSnapshot {
        DispatcherSnapshot {
            gzip_readers: self.gzip_readers.stats(),
            lz4_readers: self.lz4_readers.stats(),
            zstd_readers: self.zstd_readers.stats(),
            zstd_writers: self.zstd_writers.stats(),
        }
    }
}

static DEFAULT_DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();

/// Process-wide dispatcher with the default configuration.
pub fn default_dispatcher() -> &'static Dispatcher {
    DEFAULT_DISPATCHER.get_or_init(|| {
        Dispatcher::new(DispatcherConfig::default()).expect("default dispatcher config is valid")
    })
}

/// Decode with the process-wide dispatcher.
pub fn decompress(codec_id: u8, payload: Bytes) -> Result<Bytes, CompressionError> {
    default_dispatcher().decompress(codec_id, payload)
}

/// Encode with the process-wide dispatcher at the codec's default level.
pub fn compress(codec_id: u8, payload: &[u8]) -> Result<Bytes, CompressionError> {
    default_dispatcher().compress(codec_id, payload, None)
}
