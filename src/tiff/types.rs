//! Parsed TIFF container

use crate::io::byte_order::ByteOrder;
use crate::tiff::ifd::IFD;
use crate::tiff::constants::tags;

/// Header facts plus the IFD chain, in file order
#[derive(Debug)]
pub struct TIFF {
    pub ifds: Vec<IFD>,
    pub is_big_tiff: bool,
    pub byte_order: ByteOrder,
}

impl TIFF {
    pub fn new(is_big_tiff: bool, byte_order: ByteOrder) -> Self {
        TIFF {
            ifds: Vec::new(),
            is_big_tiff,
            byte_order,
        }
    }

    /// The full-resolution image every raster operation reads
    pub fn main_ifd(&self) -> Option<&IFD> {
        self.ifds.first()
    }

    pub fn ifd_count(&self) -> usize {
        self.ifds.len()
    }

    /// Reduced-resolution images (NewSubfileType bit 0)
    pub fn overviews(&self) -> Vec<&IFD> {
        self.ifds.iter()
            .filter(|ifd| ifd.get_tag_value(tags::NEW_SUBFILE_TYPE).is_some_and(|kind| kind & 1 == 1))
            .collect()
    }
}
