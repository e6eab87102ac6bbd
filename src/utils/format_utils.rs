//! TIFF format utilities
//!
//! Byte order and container version detection for the file header.

use log::debug;
use crate::io::seekable::SeekableReader;
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::constants::header;
use crate::tiff::validation;

/// Detects the byte order of a TIFF file and returns a matching handler
pub fn detect_byte_order(reader: &mut dyn SeekableReader) -> TiffResult<Box<dyn ByteOrderHandler>> {
    let byte_order = ByteOrder::detect(reader)?;
    debug!("Detected byte order: {}", byte_order.name());

    Ok(byte_order.create_handler())
}

/// Detects whether a file is TIFF or BigTIFF based on its version number
///
/// Expects the reader to be positioned right after the byte order mark.
/// For BigTIFF the offset-size and reserved fields are validated too.
///
/// # Returns
/// `true` for BigTIFF, `false` for classic TIFF
pub fn detect_tiff_format(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler
) -> TiffResult<bool> {
    let version = byte_order_handler.read_u16(reader)?;
    debug!("TIFF version: {}", version);

    match version {
        header::BIG_TIFF_VERSION => {
            debug!("Detected BigTIFF format");
            validation::validate_bigtiff_header(reader, byte_order_handler)?;
            Ok(true)
        },
        header::TIFF_VERSION => {
            debug!("Detected standard TIFF format");
            Ok(false)
        },
        _ => Err(TiffError::UnsupportedVersion(version)),
    }
}
