//! compression/config.rs
//! Dispatcher configuration: pool capacities and accumulator growth.
use serde::{Deserialize, Serialize};

use crate::compression::types::CompressionError;
use crate::constants::{DEFAULT_BUFFER_GROWTH, DEFAULT_POOL_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Idle gzip readers kept.
    pub gzip_readers: usize,
    /// Idle LZ4 readers kept.
    pub lz4_readers: usize,
    /// Idle Zstd readers kept.
    pub zstd_readers: usize,
    /// Idle Zstd writers kept.
    pub zstd_writers: usize,
    /// Extra capacity added on every accumulator reallocation.
    pub buffer_growth: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            gzip_readers: DEFAULT_POOL_CAPACITY,
            lz4_readers: DEFAULT_POOL_CAPACITY,
            zstd_readers: DEFAULT_POOL_CAPACITY,
            zstd_writers: DEFAULT_POOL_CAPACITY,
            buffer_growth: DEFAULT_BUFFER_GROWTH,
        }
    }
}

impl DispatcherConfig {
    pub fn from_json(raw: &str) -> Result<Self, CompressionError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| CompressionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CompressionError> {
        let pools = [
            ("gzip_readers", self.gzip_readers),
            ("lz4_readers", self.lz4_readers),
            ("zstd_readers", self.zstd_readers),
            ("zstd_writers", self.zstd_writers),
        ];
        for (name, capacity) in pools {
            if capacity == 0 {
                return Err(CompressionError::Config(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }
}
