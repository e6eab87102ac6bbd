//! Basic TIFF tag strategies
//!
//! Dimension, sample layout and chunk tags of an image IFD.

use std::collections::HashMap;
use log::debug;

use crate::tiff::builder::{ChunkLayout, ImageOptions};
use crate::tiff::builders::writer::TagData;
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::constants::{tags, photometric, planar_config};

/// Adds basic TIFF tags to an IFD
pub struct BasicTagsBuilder;

impl BasicTagsBuilder {
    /// Adds an entry for `tag` and records its values for the writer
    pub fn set_tag(
        ifd: &mut IFD,
        tag_data: &mut HashMap<(usize, u16), TagData>,
        ifd_index: usize,
        tag: u16,
        data: TagData
    ) {
        ifd.add_entry(IFDEntry::new(tag, data.field_type(), data.count(), 0));
        tag_data.insert((ifd_index, tag), data);
    }

    /// Adds every tag describing the pixel layout of `options`
    ///
    /// `byte_counts` are the encoded sizes of the chunks, in file order.
    pub fn add_image_tags(
        ifd: &mut IFD,
        tag_data: &mut HashMap<(usize, u16), TagData>,
        ifd_index: usize,
        options: &ImageOptions,
        byte_counts: &[u64],
        is_big_tiff: bool
    ) {
        debug!("Adding image tags: {}x{}, {} sample(s) of {} bits",
               options.width, options.height, options.samples_per_pixel, options.bits_per_sample);

        let spp = options.samples_per_pixel as usize;
        let mut set = |tag: u16, data: TagData| Self::set_tag(ifd, tag_data, ifd_index, tag, data);

        set(tags::IMAGE_WIDTH, TagData::Longs(vec![options.width]));
        set(tags::IMAGE_LENGTH, TagData::Longs(vec![options.height]));
        set(tags::BITS_PER_SAMPLE, TagData::Shorts(vec![options.bits_per_sample; spp]));
        set(tags::COMPRESSION, TagData::Shorts(vec![options.compression]));
        set(tags::PHOTOMETRIC_INTERPRETATION, TagData::Shorts(vec![options.photometric]));
        set(tags::SAMPLES_PER_PIXEL, TagData::Shorts(vec![options.samples_per_pixel]));
        set(tags::PLANAR_CONFIGURATION, TagData::Shorts(vec![
            if options.planar { planar_config::PLANAR } else { planar_config::CHUNKY }
        ]));
        set(tags::SAMPLE_FORMAT, TagData::Shorts(vec![options.sample_format; spp]));

        if options.predictor != crate::tiff::constants::predictor::NONE {
            set(tags::PREDICTOR, TagData::Shorts(vec![options.predictor]));
        }

        let color_samples = if options.photometric == photometric::RGB { 3 } else { 1 };
        if spp > color_samples {
            set(tags::EXTRA_SAMPLES, TagData::Shorts(vec![0; spp - color_samples]));
        }

        let (offsets_tag, counts_tag) = match options.layout {
            ChunkLayout::Strips { rows_per_strip } => {
                set(tags::ROWS_PER_STRIP, TagData::Longs(vec![rows_per_strip]));
                (tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS)
            },
            ChunkLayout::Tiles { width, height } => {
                set(tags::TILE_WIDTH, TagData::Longs(vec![width]));
                set(tags::TILE_LENGTH, TagData::Longs(vec![height]));
                (tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS)
            },
        };

        // offsets are placeholders, the writer fills in the chunk positions
        if is_big_tiff {
            set(offsets_tag, TagData::Long8s(vec![0; byte_counts.len()]));
            set(counts_tag, TagData::Long8s(byte_counts.to_vec()));
        } else {
            set(offsets_tag, TagData::Longs(vec![0; byte_counts.len()]));
            set(counts_tag, TagData::Longs(byte_counts.iter().map(|&c| c as u32).collect()));
        }
    }
}
