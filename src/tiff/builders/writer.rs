//! TIFF writing strategies
//!
//! Lays out and writes a TIFF file: header, IFDs, out-of-line tag values
//! and strip/tile data, in that order, each block aligned to 4 bytes.
//! All multi-byte values are encoded with the builder's byte order.

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::constants::{header, field_types, tags};
use crate::utils::{ifd_utils, write_utils};
use log::{debug, info};
use std::collections::HashMap;
use std::io::{Seek, SeekFrom, Write};

/// Typed values of one tag, the field type follows from the variant
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Long8s(Vec<u64>),
    Doubles(Vec<f64>),
    Ascii(String),
}

impl TagData {
    /// TIFF field type of these values
    pub fn field_type(&self) -> u16 {
        match self {
            TagData::Bytes(_) => field_types::BYTE,
            TagData::Shorts(_) => field_types::SHORT,
            TagData::Longs(_) => field_types::LONG,
            TagData::Long8s(_) => field_types::LONG8,
            TagData::Doubles(_) => field_types::DOUBLE,
            TagData::Ascii(_) => field_types::ASCII,
        }
    }

    /// Number of values (ASCII counts the terminating NUL)
    pub fn count(&self) -> u64 {
        match self {
            TagData::Bytes(v) => v.len() as u64,
            TagData::Shorts(v) => v.len() as u64,
            TagData::Longs(v) => v.len() as u64,
            TagData::Long8s(v) => v.len() as u64,
            TagData::Doubles(v) => v.len() as u64,
            TagData::Ascii(s) => s.len() as u64 + 1,
        }
    }

    /// Encodes the values in the given byte order
    pub fn encode(&self, handler: &dyn ByteOrderHandler) -> Vec<u8> {
        match self {
            TagData::Bytes(v) => v.clone(),
            TagData::Shorts(v) => encode_each(v, 2, |buf, x| handler.encode_u16(buf, *x)),
            TagData::Longs(v) => encode_each(v, 4, |buf, x| handler.encode_u32(buf, *x)),
            TagData::Long8s(v) => encode_each(v, 8, |buf, x| handler.encode_u64(buf, *x)),
            TagData::Doubles(v) => encode_each(v, 8, |buf, x| handler.encode_u64(buf, x.to_bits())),
            TagData::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                bytes
            },
        }
    }
}

fn encode_each<T>(values: &[T], width: usize, encode: impl Fn(&mut [u8], &T)) -> Vec<u8> {
    let mut out = vec![0u8; values.len() * width];
    for (chunk, value) in out.chunks_exact_mut(width).zip(values) {
        encode(chunk, value);
    }
    out
}

/// Handles writing TIFF files
pub struct WriterBuilder;

/// Offsets computed for one file before anything is written
struct Layout {
    ifd_offsets: Vec<u64>,
    /// Out-of-line value offsets per (ifd, tag)
    tag_offsets: HashMap<(usize, u16), u64>,
    /// Strip/tile offsets per ifd
    chunk_offsets: HashMap<usize, Vec<u64>>,
}

impl WriterBuilder {
    /// Write a complete TIFF file
    ///
    /// Every IFD entry must have matching values in `tag_data`. The values
    /// of StripOffsets/TileOffsets are replaced by the real chunk positions.
    pub fn write<W: Write + Seek>(
        writer: &mut W,
        is_big_tiff: bool,
        byte_order: ByteOrder,
        ifds: &[IFD],
        tag_data: &HashMap<(usize, u16), TagData>,
        chunks: &HashMap<usize, Vec<Vec<u8>>>
    ) -> TiffResult<()> {
        let handler = byte_order.create_handler();
        let sorted_ifds = Self::prepare_sorted_ifds(ifds);
        let layout = Self::calculate_offsets(&sorted_ifds, chunks, is_big_tiff);

        Self::write_header(writer, handler.as_ref(), is_big_tiff, layout.ifd_offsets.first().copied().unwrap_or(0))?;

        for (index, ifd) in sorted_ifds.iter().enumerate() {
            let next_ifd_offset = layout.ifd_offsets.get(index + 1).copied().unwrap_or(0);
            let values = Self::resolve_values(index, ifd, tag_data, &layout, is_big_tiff, handler.as_ref())?;

            writer.seek(SeekFrom::Start(layout.ifd_offsets[index]))?;
            Self::write_ifd(writer, handler.as_ref(), ifd, &values, &layout, index, next_ifd_offset, is_big_tiff)?;

            for entry in &ifd.entries {
                if let Some(&offset) = layout.tag_offsets.get(&(index, entry.tag)) {
                    let bytes = &values[&entry.tag];
                    writer.seek(SeekFrom::Start(offset))?;
                    writer.write_all(bytes)?;
                    write_utils::write_padding(writer, bytes.len())?;
                }
            }

            if let (Some(data), Some(offsets)) = (chunks.get(&index), layout.chunk_offsets.get(&index)) {
                for (chunk, &offset) in data.iter().zip(offsets) {
                    writer.seek(SeekFrom::Start(offset))?;
                    writer.write_all(chunk)?;
                    write_utils::write_padding(writer, chunk.len())?;
                }
            }
        }

        writer.flush()?;
        info!("Wrote {} IFD(s), {} chunk(s)", sorted_ifds.len(),
              chunks.values().map(|c| c.len()).sum::<usize>());
        Ok(())
    }

    /// Prepare sorted IFDs with unique tags
    fn prepare_sorted_ifds(ifds: &[IFD]) -> Vec<IFD> {
        ifds.iter().map(|ifd| {
            let mut sorted_ifd = ifd.clone();
            sorted_ifd.entries = write_utils::get_unique_sorted_entries(&ifd.entries);
            sorted_ifd
        }).collect()
    }

    /// Assigns file positions: all IFDs first, then per IFD its
    /// out-of-line values followed by its chunks
    fn calculate_offsets(
        sorted_ifds: &[IFD],
        chunks: &HashMap<usize, Vec<Vec<u8>>>,
        is_big_tiff: bool
    ) -> Layout {
        let mut current_offset: u64 = if is_big_tiff { 16 } else { 8 };
        let mut ifd_offsets = Vec::with_capacity(sorted_ifds.len());

        for ifd in sorted_ifds {
            ifd_offsets.push(current_offset);
            current_offset += ifd_utils::calculate_ifd_size(ifd, is_big_tiff);
            current_offset = write_utils::align_to_4_bytes(current_offset);
        }

        let mut tag_offsets = HashMap::new();
        let mut chunk_offsets = HashMap::new();
        for (index, ifd) in sorted_ifds.iter().enumerate() {
            for entry in &ifd.entries {
                if !entry.is_value_inline(is_big_tiff) {
                    tag_offsets.insert((index, entry.tag), current_offset);
                    current_offset = write_utils::align_to_4_bytes(current_offset + entry.data_size());
                }
            }

            if let Some(data) = chunks.get(&index) {
                let mut offsets = Vec::with_capacity(data.len());
                for chunk in data {
                    offsets.push(current_offset);
                    current_offset = write_utils::align_to_4_bytes(current_offset + chunk.len() as u64);
                }
                chunk_offsets.insert(index, offsets);
            }
        }

        debug!("TIFF layout: {} bytes total", current_offset);
        Layout { ifd_offsets, tag_offsets, chunk_offsets }
    }

    /// Encodes the value bytes of every entry of one IFD
    fn resolve_values(
        index: usize,
        ifd: &IFD,
        tag_data: &HashMap<(usize, u16), TagData>,
        layout: &Layout,
        is_big_tiff: bool,
        handler: &dyn ByteOrderHandler
    ) -> TiffResult<HashMap<u16, Vec<u8>>> {
        let mut values = HashMap::with_capacity(ifd.entries.len());

        for entry in &ifd.entries {
            let data = match entry.tag {
                tags::STRIP_OFFSETS | tags::TILE_OFFSETS => {
                    let offsets = layout.chunk_offsets.get(&index).cloned().unwrap_or_default();
                    if offsets.len() as u64 != entry.count {
                        return Err(TiffError::GenericError(format!(
                            "IFD #{} declares {} chunks but holds {}", index, entry.count, offsets.len()
                        )));
                    }
                    if is_big_tiff {
                        TagData::Long8s(offsets)
                    } else {
                        let offsets = offsets.into_iter()
                            .map(|o| u32::try_from(o).map_err(|_| TiffError::GenericError(
                                "File too large for classic TIFF, use BigTIFF".to_string())))
                            .collect::<TiffResult<Vec<u32>>>()?;
                        TagData::Longs(offsets)
                    }
                },
                tag => tag_data.get(&(index, tag)).cloned().ok_or_else(|| {
                    TiffError::GenericError(format!("No values for tag {} in IFD #{}", tag, index))
                })?,
            };

            values.insert(entry.tag, data.encode(handler));
        }

        Ok(values)
    }

    /// Write TIFF header, including the first IFD offset
    fn write_header(
        writer: &mut impl Write,
        handler: &dyn ByteOrderHandler,
        is_big_tiff: bool,
        first_ifd_offset: u64
    ) -> TiffResult<()> {
        let marker = match handler.order() {
            ByteOrder::LittleEndian => header::LITTLE_ENDIAN_MARKER,
            ByteOrder::BigEndian => header::BIG_ENDIAN_MARKER,
        };
        writer.write_all(&marker)?;

        if is_big_tiff {
            let mut buf = [0u8; 14];
            handler.encode_u16(&mut buf[0..2], header::BIG_TIFF_VERSION);
            handler.encode_u16(&mut buf[2..4], header::BIGTIFF_OFFSET_SIZE);
            handler.encode_u64(&mut buf[6..14], first_ifd_offset);
            writer.write_all(&buf)?;
        } else {
            let mut buf = [0u8; 6];
            handler.encode_u16(&mut buf[0..2], header::TIFF_VERSION);
            handler.encode_u32(&mut buf[2..6], first_ifd_offset as u32);
            writer.write_all(&buf)?;
        }

        Ok(())
    }

    /// Write an IFD (Image File Directory)
    #[allow(clippy::too_many_arguments)]
    fn write_ifd(
        writer: &mut impl Write,
        handler: &dyn ByteOrderHandler,
        ifd: &IFD,
        values: &HashMap<u16, Vec<u8>>,
        layout: &Layout,
        ifd_index: usize,
        next_offset: u64,
        is_big_tiff: bool
    ) -> TiffResult<()> {
        let field_width = if is_big_tiff { 8 } else { 4 };
        let mut buf = vec![0u8; ifd_utils::calculate_ifd_size(ifd, is_big_tiff) as usize];
        let mut pos = 0;

        if is_big_tiff {
            handler.encode_u64(&mut buf[pos..pos + 8], ifd.entries.len() as u64);
            pos += 8;
        } else {
            handler.encode_u16(&mut buf[pos..pos + 2], ifd.entries.len() as u16);
            pos += 2;
        }

        for entry in &ifd.entries {
            Self::encode_entry_header(&mut buf[pos..], handler, entry, is_big_tiff);
            pos += if is_big_tiff { 12 } else { 8 };

            let field = &mut buf[pos..pos + field_width];
            match layout.tag_offsets.get(&(ifd_index, entry.tag)) {
                Some(&offset) if is_big_tiff => handler.encode_u64(field, offset),
                Some(&offset) => handler.encode_u32(field, offset as u32),
                None => {
                    let bytes = &values[&entry.tag];
                    field[..bytes.len()].copy_from_slice(bytes);
                }
            }
            pos += field_width;
        }

        if is_big_tiff {
            handler.encode_u64(&mut buf[pos..pos + 8], next_offset);
        } else {
            handler.encode_u32(&mut buf[pos..pos + 4], next_offset as u32);
        }

        writer.write_all(&buf)?;
        Ok(())
    }

    fn encode_entry_header(buf: &mut [u8], handler: &dyn ByteOrderHandler, entry: &IFDEntry, is_big_tiff: bool) {
        handler.encode_u16(&mut buf[0..2], entry.tag);
        handler.encode_u16(&mut buf[2..4], entry.field_type);
        if is_big_tiff {
            handler.encode_u64(&mut buf[4..12], entry.count);
        } else {
            handler.encode_u32(&mut buf[4..8], entry.count as u32);
        }
    }
}
