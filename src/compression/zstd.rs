//! Zstandard codec (compression code 14)

use log::trace;

use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// Level used when writing
const DEFAULT_LEVEL: i32 = 3;

pub struct ZstdHandler {
    level: i32,
}

impl Default for ZstdHandler {
    fn default() -> Self {
        ZstdHandler { level: DEFAULT_LEVEL }
    }
}

impl CompressionHandler for ZstdHandler {
    fn decompress(&self, data: &[u8], expected_size: usize) -> TiffResult<Vec<u8>> {
        trace!("zstd: {} bytes in, {} expected out", data.len(), expected_size);
        if data.is_empty() {
            return Ok(Vec::new());
        }
        zstd::decode_all(data).map_err(|e| TiffError::codec(self.name(), e))
    }

    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        zstd::encode_all(data, self.level).map_err(|e| TiffError::codec(self.name(), e))
    }

    fn name(&self) -> &'static str {
        "Zstandard"
    }
}
