//! TIFF validation utilities
//!
//! Bounds checks applied while walking a possibly malformed file.

use log::{debug, error, warn};
use std::io::{Seek, SeekFrom};

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::constants::header;

/// Validates an IFD offset against the file size
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> TiffResult<()> {
    if offset >= file_size || offset < 8 {
        return Err(TiffError::GenericError(format!(
            "Invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Gets the stream size, restoring the current position
///
/// Returns `u64::MAX` when the size cannot be determined.
pub fn get_file_size(reader: &mut dyn SeekableReader) -> TiffResult<u64> {
    let current_position = reader.stream_position()?;
    let file_size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => size,
        Err(e) => {
            warn!("Could not determine file size: {}", e);
            u64::MAX
        }
    };
    reader.seek(SeekFrom::Start(current_position))?;

    Ok(file_size)
}

/// Validates the BigTIFF header fields that follow the version number
///
/// BigTIFF stores the offset size (always 8) and a reserved zero.
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler
) -> TiffResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let zeros = byte_order_handler.read_u16(reader)?;

    debug!("BigTIFF offset size: {}, reserved: {}", offset_size, zeros);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || zeros != 0 {
        error!("Invalid BigTIFF header: offset_size={}, zeros={}", offset_size, zeros);
        return Err(TiffError::InvalidBigTIFFHeader);
    }

    Ok(())
}

/// Checks that a strip or tile lies entirely inside the file
pub fn validate_chunk_range(offset: u64, byte_count: u64, file_size: u64) -> TiffResult<()> {
    match offset.checked_add(byte_count) {
        Some(end) if end <= file_size => Ok(()),
        _ => Err(TiffError::TruncatedData {
            expected: byte_count as usize,
            actual: file_size.saturating_sub(offset) as usize,
        }),
    }
}
