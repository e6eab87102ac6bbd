//! TIFF file reader implementation
//!
//! Walks the header and IFD chain of a TIFF/BigTIFF stream and decodes tag
//! values, using the byte order strategy picked from the header.

use log::{debug, info, warn};
use std::io::{Read, Seek, SeekFrom};

use crate::io::seekable::SeekableReader;
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::types::TIFF;
use crate::tiff::constants::field_types;
use crate::tiff::validation;
use crate::utils::format_utils;
use crate::utils::ifd_utils;
use crate::utils::tag_utils;

/// Upper bound on the IFD chain length, guards against offset cycles
const MAX_IFDS: usize = 256;

/// Reader for TIFF and BigTIFF files
///
/// A reader is bound to one stream: `read` detects the byte order and
/// format, and the tag accessors reuse them afterwards.
pub struct TiffReader {
    /// Byte order handler, set once the header has been read
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Whether the stream is BigTIFF
    is_big_tiff: bool,
}

impl Default for TiffReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TiffReader {
    /// Creates a new TIFF reader
    pub fn new() -> Self {
        TiffReader {
            byte_order_handler: None,
            is_big_tiff: false,
        }
    }

    /// Returns the byte order handler or an error if no header was read yet
    pub fn handler(&self) -> TiffResult<&dyn ByteOrderHandler> {
        self.byte_order_handler.as_deref()
            .ok_or_else(|| TiffError::GenericError("Byte order not yet determined".to_string()))
    }

    /// Returns whether the current stream is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }

    /// Reads the header and the full IFD chain
    ///
    /// 1. Detect byte order (II/MM)
    /// 2. Check for TIFF or BigTIFF format
    /// 3. Follow the IFD chain from the first offset
    ///
    /// Fails with `NoImageDirectory` when the first IFD cannot be read.
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> TiffResult<TIFF> {
        debug!("TiffReader::read starting");
        reader.seek(SeekFrom::Start(0))?;

        let handler = format_utils::detect_byte_order(reader)?;
        let byte_order = handler.order();
        self.is_big_tiff = format_utils::detect_tiff_format(reader, handler.as_ref())?;
        self.byte_order_handler = Some(handler);

        let handler = self.handler()?;
        let first_ifd_offset = ifd_utils::read_ifd_offset(reader, self.is_big_tiff, handler)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        let file_size = validation::get_file_size(reader)?;
        validation::validate_ifd_offset(first_ifd_offset, file_size)
            .map_err(|_| TiffError::NoImageDirectory)?;

        let mut tiff = TIFF::new(self.is_big_tiff, byte_order);
        tiff.ifds = self.read_ifd_chain(reader, first_ifd_offset, file_size)?;

        if tiff.ifds.is_empty() {
            return Err(TiffError::NoImageDirectory);
        }

        info!("Read {} IFD(s) from {} file", tiff.ifds.len(),
              if self.is_big_tiff { "BigTIFF" } else { "TIFF" });
        Ok(tiff)
    }

    /// Reads a chain of IFDs starting from the given offset
    ///
    /// Errors after the first IFD stop the walk with a warning; the
    /// directories read so far are kept.
    fn read_ifd_chain(&self, reader: &mut dyn SeekableReader, first_ifd_offset: u64, file_size: u64) -> TiffResult<Vec<IFD>> {
        let mut ifds: Vec<IFD> = Vec::new();
        let mut ifd_offset = first_ifd_offset;

        while ifd_offset != 0 && ifds.len() < MAX_IFDS {
            if ifds.iter().any(|ifd| ifd.offset == ifd_offset) {
                warn!("IFD offset {} already visited, stopping IFD chain", ifd_offset);
                break;
            }

            let number = ifds.len();
            let ifd = match self.read_ifd(reader, ifd_offset, number) {
                Ok(ifd) => ifd,
                Err(e) if number == 0 => return Err(e),
                Err(e) => {
                    warn!("Error reading IFD {}: {}", number, e);
                    break;
                }
            };

            let next_offset = self.read_next_ifd_offset(reader, &ifd);
            ifds.push(ifd);

            match next_offset {
                Ok(next) if next == 0 => break,
                Ok(next) if next >= file_size || next < 8 => {
                    warn!("Invalid next IFD offset: {}, stopping IFD chain", next);
                    break;
                },
                Ok(next) => ifd_offset = next,
                Err(e) => {
                    warn!("Error reading next IFD offset: {}", e);
                    break;
                }
            }
        }

        Ok(ifds)
    }

    fn read_next_ifd_offset(&self, reader: &mut dyn SeekableReader, ifd: &IFD) -> TiffResult<u64> {
        let position = ifd.offset + ifd_utils::calculate_ifd_size(ifd, self.is_big_tiff)
            - if self.is_big_tiff { 8 } else { 4 };
        reader.seek(SeekFrom::Start(position))?;
        ifd_utils::read_ifd_offset(reader, self.is_big_tiff, self.handler()?)
    }

    /// Reads one IFD located at `offset`
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u64, number: usize) -> TiffResult<IFD> {
        reader.seek(SeekFrom::Start(offset))?;

        let entry_count = ifd_utils::read_entry_count(reader, self.is_big_tiff, self.handler()?)?;
        debug!("IFD #{} entry count: {}", number, entry_count);

        let mut ifd = IFD::new(number, offset);
        for _ in 0..entry_count {
            let entry = self.read_ifd_entry(reader)?;
            ifd.add_entry(entry);
        }

        Ok(ifd)
    }

    /// Reads a single IFD entry
    ///
    /// The raw value field is kept on the entry. For single inline values
    /// `value_offset` holds the value decoded at its own width, otherwise it
    /// holds the offset of the value array.
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> TiffResult<IFDEntry> {
        let handler = self.handler()?;

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        let field_width = if self.is_big_tiff { 8 } else { 4 };
        let mut raw = [0u8; 8];
        reader.read_exact(&mut raw[..field_width])?;

        let probe = IFDEntry::with_inline_bytes(tag, field_type, count, 0, raw);
        let value_offset = if count == 1 && probe.is_value_inline(self.is_big_tiff) {
            match field_type {
                field_types::BYTE | field_types::SBYTE | field_types::UNDEFINED => raw[0] as u64,
                field_types::SHORT | field_types::SSHORT => handler.decode_u16(&raw) as u64,
                field_types::LONG | field_types::SLONG | field_types::FLOAT => handler.decode_u32(&raw) as u64,
                _ if self.is_big_tiff => handler.decode_u64(&raw),
                _ => handler.decode_u32(&raw) as u64,
            }
        } else if self.is_big_tiff {
            handler.decode_u64(&raw)
        } else {
            handler.decode_u32(&raw) as u64
        };

        Ok(IFDEntry::with_inline_bytes(tag, field_type, count, value_offset, raw))
    }

    /// Rejects an out-of-line value array that does not fit in the stream
    fn check_value_bounds(&self, reader: &mut dyn SeekableReader, entry: &IFDEntry) -> TiffResult<()> {
        let file_size = validation::get_file_size(reader)?;
        let end = entry.value_offset.saturating_add(entry.data_size());
        if end > file_size {
            warn!("Tag {} declares {} value(s) ending at byte {}, file has {}",
                  entry.tag, entry.count, end, file_size);
            return Err(TiffError::ValueOutOfBounds { tag: entry.tag, end, file_size });
        }
        Ok(())
    }

    /// Reads a tag's values as a vector of u64
    ///
    /// Handles both inline and out-of-line arrays for every integer field type.
    pub fn read_tag_values(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> TiffResult<Vec<u64>> {
        let entry = ifd.get_entry(tag)
            .ok_or(TiffError::TagNotFound(tag))?;
        let handler = self.handler()?;
        let inline = entry.is_value_inline(self.is_big_tiff);
        if !inline {
            self.check_value_bounds(reader, entry)?;
        }

        let mut values = Vec::with_capacity(entry.count as usize);
        if inline {
            let mut inline = tag_utils::inline_reader(entry);
            tag_utils::read_tag_value_array(&mut inline, entry, handler, &mut values)?;
        } else {
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            tag_utils::read_tag_value_array(reader, entry, handler, &mut values)?;
        }

        Ok(values)
    }

    /// Reads a DOUBLE or FLOAT tag's values
    pub fn read_tag_f64s(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> TiffResult<Vec<f64>> {
        let entry = ifd.get_entry(tag)
            .ok_or(TiffError::TagNotFound(tag))?;
        let handler = self.handler()?;
        let inline = entry.is_value_inline(self.is_big_tiff);
        if !inline {
            self.check_value_bounds(reader, entry)?;
        }

        let mut values = Vec::with_capacity(entry.count as usize);
        if inline {
            let mut inline = tag_utils::inline_reader(entry);
            tag_utils::read_tag_double_array(&mut inline, entry, handler, &mut values)?;
        } else {
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            tag_utils::read_tag_double_array(reader, entry, handler, &mut values)?;
        }

        Ok(values)
    }

    /// Reads a tag's first value, falling back to `default` when absent
    pub fn read_tag_or(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16, default: u64) -> TiffResult<u64> {
        if !ifd.has_tag(tag) {
            return Ok(default);
        }
        let values = self.read_tag_values(reader, ifd, tag)?;
        Ok(values.first().copied().unwrap_or(default))
    }

    /// Reads an ASCII tag, with trailing null characters removed
    pub fn read_ascii(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> TiffResult<String> {
        let entry = ifd.get_entry(tag)
            .ok_or(TiffError::TagNotFound(tag))?;

        let mut buffer = if entry.is_value_inline(self.is_big_tiff) {
            entry.inline_bytes[..entry.count as usize].to_vec()
        } else {
            self.check_value_bounds(reader, entry)?;
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            let mut buffer = vec![0u8; entry.count as usize];
            reader.read_exact(&mut buffer)?;
            buffer
        };

        while buffer.last() == Some(&0) {
            buffer.pop();
        }
        String::from_utf8(buffer)
            .map_err(|e| TiffError::GenericError(format!("Invalid UTF-8 string: {}", e)))
    }
}
