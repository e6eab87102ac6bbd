//! Compression handler trait definition

use crate::tiff::errors::TiffResult;

/// Strategy trait for one TIFF compression scheme
pub trait CompressionHandler: Send + Sync {
    /// Decodes one strip or tile
    ///
    /// `expected_size` is the size implied by the image layout. It sizes the
    /// output buffer and tells run-length codecs where to stop.
    fn decompress(&self, data: &[u8], expected_size: usize) -> TiffResult<Vec<u8>>;

    /// Encodes one strip or tile
    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>>;

    /// Display name of the scheme
    fn name(&self) -> &'static str;
}

/// Compression code 1, bytes are stored as they are
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn decompress(&self, data: &[u8], _expected_size: usize) -> TiffResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "None"
    }
}
