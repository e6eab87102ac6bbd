//! Maps TIFF compression codes to handlers

use log::debug;

use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::constants::compression;
use super::handler::{CompressionHandler, UncompressedHandler};
use super::deflate::AdobeDeflateHandler;
use super::packbits::PackBitsHandler;
use super::zstd::ZstdHandler;

pub struct CompressionFactory;

impl CompressionFactory {
    /// Handler for a Compression tag value
    pub fn create_handler(code: u64) -> TiffResult<Box<dyn CompressionHandler>> {
        let handler: Box<dyn CompressionHandler> = match u16::try_from(code) {
            Ok(compression::NONE) => Box::new(UncompressedHandler),
            Ok(compression::DEFLATE | compression::DEFLATE_LEGACY) => Box::new(AdobeDeflateHandler),
            Ok(compression::PACKBITS) => Box::new(PackBitsHandler),
            Ok(compression::ZSTD) => Box::new(ZstdHandler::default()),
            _ => return Err(TiffError::UnsupportedCompression(code)),
        };
        debug!("Compression {} handled by {}", code, handler.name());
        Ok(handler)
    }

    pub fn is_supported(code: u64) -> bool {
        matches!(
            u16::try_from(code),
            Ok(compression::NONE | compression::DEFLATE | compression::DEFLATE_LEGACY
               | compression::PACKBITS | compression::ZSTD)
        )
    }
}
