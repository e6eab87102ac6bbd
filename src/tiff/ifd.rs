//! Image File Directory (IFD) structures and methods
//!
//! An IFD is the tag table that describes one image inside a TIFF file.
//! Multiband GeoTIFFs keep everything the raster reader needs in the first
//! IFD: dimensions, sample layout, chunk offsets and the georeferencing tags.

use std::collections::HashMap;
use std::fmt;
use log::{debug, trace};

use crate::tiff::constants::tags;
use crate::utils::tag_utils;

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD, in file order
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Cached entries for lookup by tag
    tag_map: HashMap<u16, IFDEntry>,
}

/// Represents an entry in an Image File Directory (IFD)
///
/// `value_offset` holds either the offset of the value array or, for
/// inline scalars, the decoded value itself. `inline_bytes` keeps the raw
/// value field so inline arrays (two SHORTs in a classic TIFF, up to four
/// in BigTIFF) can be decoded with the file's byte order.
#[derive(Debug, Clone)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Value or offset to values
    pub value_offset: u64,
    /// Raw bytes of the value field as stored in the file
    pub inline_bytes: [u8; 8],
}

impl IFDEntry {
    /// Creates a new IFD entry from an already decoded value/offset
    ///
    /// The raw value field is filled in little-endian order, which is the
    /// order the writer uses.
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64) -> Self {
        trace!("Creating IFD entry: tag={} ({}), type={} ({}), count={}, offset/value={}",
               tag, tag_utils::get_tag_name(tag), field_type,
               tag_utils::get_field_type_name(field_type), count, value_offset);

        Self {
            tag,
            field_type,
            count,
            value_offset,
            inline_bytes: value_offset.to_le_bytes(),
        }
    }

    /// Creates an entry that keeps the raw value field read from a file
    pub fn with_inline_bytes(tag: u16, field_type: u16, count: u64, value_offset: u64, inline_bytes: [u8; 8]) -> Self {
        Self {
            tag,
            field_type,
            count,
            value_offset,
            inline_bytes,
        }
    }

    /// Get the size in bytes for this entry's field type
    pub fn get_field_type_size(&self) -> usize {
        tag_utils::get_field_type_size(self.field_type)
    }

    /// Total size in bytes of the entry's values
    pub fn data_size(&self) -> u64 {
        (self.get_field_type_size() as u64).saturating_mul(self.count)
    }

    /// Determines if the value is stored inline in the value field
    pub fn is_value_inline(&self, is_big_tiff: bool) -> bool {
        let inline_size = if is_big_tiff { 8 } else { 4 };
        self.data_size() <= inline_size
    }
}

impl IFD {
    /// Creates a new empty IFD
    pub fn new(number: usize, offset: u64) -> Self {
        debug!("Creating new IFD #{} at offset {}", number, offset);

        Self {
            entries: Vec::new(),
            number,
            offset,
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry to this IFD, replacing an earlier entry for the same tag
    pub fn add_entry(&mut self, entry: IFDEntry) {
        trace!("Adding tag {} to IFD #{}", entry.tag, self.number);

        self.entries.retain(|e| e.tag != entry.tag);
        self.tag_map.insert(entry.tag, entry.clone());
        self.entries.push(entry);
    }

    /// Gets a tag value (value_offset) directly
    pub fn get_tag_value(&self, tag: u16) -> Option<u64> {
        self.tag_map.get(&tag).map(|entry| entry.value_offset)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag)
    }

    /// Gets the dimensions (width, height) of the image described by this IFD
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_tag_value(tags::IMAGE_WIDTH)?;
        let height = self.get_tag_value(tags::IMAGE_LENGTH)?;
        Some((width, height))
    }

    /// Returns number of samples per pixel (default 1 if not specified)
    ///
    /// For a multiband raster this is the band count.
    pub fn get_samples_per_pixel(&self) -> u64 {
        self.get_tag_value(tags::SAMPLES_PER_PIXEL).unwrap_or(1)
    }

    /// Whether pixel data is organised in tiles rather than strips
    pub fn is_tiled(&self) -> bool {
        self.has_tag(tags::TILE_WIDTH) && self.has_tag(tags::TILE_LENGTH)
    }

    /// Whether this IFD carries any georeferencing tag
    pub fn has_georeferencing(&self) -> bool {
        self.has_tag(tags::MODEL_TRANSFORMATION_TAG)
            || (self.has_tag(tags::MODEL_PIXEL_SCALE_TAG) && self.has_tag(tags::MODEL_TIEPOINT_TAG))
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;

        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }

        writeln!(f, "  Samples per pixel: {}", self.get_samples_per_pixel())?;
        writeln!(f, "  Tags:")?;
        for entry in &self.entries {
            let value_display = match entry.tag {
                tags::COMPRESSION => format!("{} ({})",
                                             entry.value_offset,
                                             tag_utils::get_compression_name(entry.value_offset)),
                _ => entry.value_offset.to_string()
            };

            writeln!(f, "    {} ({}): {} [{} x{}]",
                     entry.tag,
                     tag_utils::get_tag_name(entry.tag),
                     value_display,
                     tag_utils::get_field_type_name(entry.field_type),
                     entry.count)?;
        }

        Ok(())
    }
}
