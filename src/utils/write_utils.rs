//! TIFF writing utilities
//!
//! Alignment and entry ordering helpers for the writer.

use crate::tiff::errors::TiffResult;
use crate::tiff::ifd::IFDEntry;
use std::io::Write;

/// Align an offset to the next 4-byte boundary
pub fn align_to_4_bytes(offset: u64) -> u64 {
    (offset + 3) & !3
}

/// Write the padding bytes that follow a block of `data_len` bytes
pub fn write_padding(writer: &mut impl Write, data_len: usize) -> TiffResult<()> {
    let padding = (4 - (data_len % 4)) % 4;
    if padding > 0 {
        writer.write_all(&[0u8; 3][..padding])?;
    }
    Ok(())
}

/// IFD entries sorted by tag number, keeping the last entry for repeated tags
pub fn get_unique_sorted_entries(entries: &[IFDEntry]) -> Vec<IFDEntry> {
    let mut sorted_entries: Vec<IFDEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        sorted_entries.retain(|e| e.tag != entry.tag);
        sorted_entries.push(entry.clone());
    }
    sorted_entries.sort_by_key(|entry| entry.tag);
    sorted_entries
}
