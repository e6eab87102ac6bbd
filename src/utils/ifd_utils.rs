//! IFD utilities
//!
//! Layout arithmetic and offset reading for Image File Directories.

use crate::io::seekable::SeekableReader;
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::errors::TiffResult;
use crate::tiff::ifd::IFD;

/// Reads an IFD offset (first-IFD pointer or next-IFD link)
///
/// Offsets are 8 bytes wide in BigTIFF and 4 bytes in classic TIFF.
pub fn read_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &dyn ByteOrderHandler
) -> TiffResult<u64> {
    if is_big_tiff {
        Ok(byte_order_handler.read_u64(reader)?)
    } else {
        Ok(byte_order_handler.read_u32(reader)? as u64)
    }
}

/// Reads the entry count at the start of an IFD
pub fn read_entry_count(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &dyn ByteOrderHandler
) -> TiffResult<u64> {
    if is_big_tiff {
        Ok(byte_order_handler.read_u64(reader)?)
    } else {
        Ok(byte_order_handler.read_u16(reader)? as u64)
    }
}

/// Size of a single IFD entry on disk
pub fn entry_size(is_big_tiff: bool) -> u64 {
    if is_big_tiff { 20 } else { 12 }
}

/// Calculates the size of an IFD in bytes, up to and including the next-IFD link
pub fn calculate_ifd_size(ifd: &IFD, is_big_tiff: bool) -> u64 {
    let entries = entry_size(is_big_tiff) * ifd.entries.len() as u64;
    if is_big_tiff {
        // 8 (entry count) + entries + 8 (next IFD offset)
        8 + entries + 8
    } else {
        // 2 (entry count) + entries + 4 (next IFD offset)
        2 + entries + 4
    }
}
