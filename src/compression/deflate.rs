//! Adobe Deflate (zlib stream) codec

use std::io::{Read, Write};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// Handles compression code 8 and the pre-standard code 32946
pub struct AdobeDeflateHandler;

impl CompressionHandler for AdobeDeflateHandler {
    fn decompress(&self, data: &[u8], expected_size: usize) -> TiffResult<Vec<u8>> {
        let mut decoded = Vec::with_capacity(expected_size);
        ZlibDecoder::new(data)
            .read_to_end(&mut decoded)
            .map_err(|e| TiffError::codec(self.name(), e))?;
        Ok(decoded)
    }

    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
        encoder.write_all(data).map_err(|e| TiffError::codec(self.name(), e))?;
        encoder.finish().map_err(|e| TiffError::codec(self.name(), e))
    }

    fn name(&self) -> &'static str {
        "Adobe Deflate"
    }
}
