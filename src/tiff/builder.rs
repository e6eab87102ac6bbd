//! TIFF file construction
//!
//! `TiffBuilder` assembles single- or multiband GeoTIFFs: image IFDs with
//! strips or tiles, optional compression and predictor, and the GeoTIFF
//! model tags. It is used to export masks and to produce test rasters.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use log::{error, info};

use crate::io::byte_order::ByteOrder;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::constants::{compression, photometric, predictor, sample_format};
use crate::compression::CompressionFactory;

use crate::tiff::builders::basic_tags::BasicTagsBuilder;
use crate::tiff::builders::chunk_encoder::ChunkEncoder;
use crate::tiff::builders::geo_tags::GeoTagsBuilder;
use crate::tiff::builders::writer::WriterBuilder;
pub use crate::tiff::builders::writer::TagData;

/// How pixel data is split into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkLayout {
    /// Full-width strips of `rows_per_strip` rows (the last one may be shorter)
    Strips { rows_per_strip: u32 },
    /// Fixed-size tiles, padded at the right and bottom edges
    Tiles { width: u32, height: u32 },
}

impl ChunkLayout {
    /// (chunk width, chunk height, chunks across, chunks down) for one plane
    pub fn grid(&self, width: usize, height: usize) -> (usize, usize, usize, usize) {
        match *self {
            ChunkLayout::Strips { rows_per_strip } => {
                let rows = (rows_per_strip as usize).clamp(1, height.max(1));
                (width, rows, 1, height.div_ceil(rows))
            },
            ChunkLayout::Tiles { width: tw, height: th } => {
                let (tw, th) = (tw.max(1) as usize, th.max(1) as usize);
                (tw, th, width.div_ceil(tw), height.div_ceil(th))
            },
        }
    }
}

/// Pixel layout of an image to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOptions {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u16,
    pub bits_per_sample: u16,
    pub sample_format: u16,
    pub planar: bool,
    pub layout: ChunkLayout,
    pub compression: u16,
    pub predictor: u16,
    pub photometric: u16,
}

impl ImageOptions {
    /// 8-bit unsigned, chunky, uncompressed, one strip
    pub fn new(width: u32, height: u32, samples_per_pixel: u16) -> Self {
        ImageOptions {
            width,
            height,
            samples_per_pixel,
            bits_per_sample: 8,
            sample_format: sample_format::UNSIGNED,
            planar: false,
            layout: ChunkLayout::Strips { rows_per_strip: height.max(1) },
            compression: compression::NONE,
            predictor: predictor::NONE,
            photometric: photometric::BLACK_IS_ZERO,
        }
    }

    pub fn with_samples(mut self, bits_per_sample: u16, sample_format: u16) -> Self {
        self.bits_per_sample = bits_per_sample;
        self.sample_format = sample_format;
        self
    }

    pub fn with_planar(mut self, planar: bool) -> Self {
        self.planar = planar;
        self
    }

    pub fn with_layout(mut self, layout: ChunkLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_compression(mut self, compression: u16) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_predictor(mut self, predictor: u16) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Mask of the valid bits of one sample
    pub fn sample_mask(&self) -> u64 {
        if self.bits_per_sample >= 64 { u64::MAX } else { (1u64 << self.bits_per_sample) - 1 }
    }

    /// (chunk width, chunk height, chunks across, chunks down) for one plane
    pub fn chunk_grid(&self) -> (usize, usize, usize, usize) {
        self.layout.grid(self.width as usize, self.height as usize)
    }

    /// Checks that the options describe something the writer can encode
    pub fn validate(&self) -> TiffResult<()> {
        if self.width == 0 || self.height == 0 || self.samples_per_pixel == 0 {
            return Err(TiffError::MissingDimensions);
        }

        let valid_depth = match self.sample_format {
            sample_format::IEEEFP => matches!(self.bits_per_sample, 32 | 64),
            sample_format::UNSIGNED | sample_format::SIGNED => matches!(self.bits_per_sample, 8 | 16 | 32 | 64),
            _ => false,
        };
        if !valid_depth {
            return Err(TiffError::UnsupportedSampleLayout(format!(
                "{}-bit samples of format {}", self.bits_per_sample, self.sample_format
            )));
        }

        if self.predictor == predictor::HORIZONTAL_DIFFERENCING && self.sample_format == sample_format::IEEEFP {
            return Err(TiffError::UnsupportedSampleLayout(
                "horizontal differencing on floating point samples".to_string()
            ));
        }

        if let ChunkLayout::Tiles { width, height } = self.layout {
            if width == 0 || height == 0 {
                return Err(TiffError::GenericError("Tile dimensions must be positive".to_string()));
            }
        }

        if !CompressionFactory::is_supported(self.compression as u64) {
            return Err(TiffError::UnsupportedCompression(self.compression as u64));
        }

        Ok(())
    }
}

/// Builder for creating TIFF files
pub struct TiffBuilder {
    is_big_tiff: bool,
    byte_order: ByteOrder,
    pub ifds: Vec<IFD>,
    tag_data: HashMap<(usize, u16), TagData>,
    chunks: HashMap<usize, Vec<Vec<u8>>>,
}

impl TiffBuilder {
    /// Create a new little-endian TIFF builder
    pub fn new(is_big_tiff: bool) -> Self {
        info!("Creating new TiffBuilder (is_big_tiff: {})", is_big_tiff);
        TiffBuilder {
            is_big_tiff,
            byte_order: ByteOrder::LittleEndian,
            ifds: Vec::new(),
            tag_data: HashMap::new(),
            chunks: HashMap::new(),
        }
    }

    /// Selects the byte order of the written file
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    fn check_index(&self, ifd_index: usize) -> TiffResult<()> {
        if ifd_index >= self.ifds.len() {
            error!("Invalid IFD index {}, only have {} IFDs", ifd_index, self.ifds.len());
            return Err(TiffError::GenericError(format!(
                "Invalid IFD index {}, only have {} IFDs", ifd_index, self.ifds.len())));
        }
        Ok(())
    }

    /// Adds an image IFD holding `samples` encoded per `options`
    ///
    /// Samples are pixel-interleaved: `(row * width + col) * spp + band`.
    /// Returns the index of the new IFD.
    pub fn add_image(&mut self, options: &ImageOptions, samples: &[f64]) -> TiffResult<usize> {
        options.validate()?;

        let handler = self.byte_order.create_handler();
        let chunks = ChunkEncoder::new(options, handler.as_ref()).encode(samples)?;
        let byte_counts: Vec<u64> = chunks.iter().map(|c| c.len() as u64).collect();

        let ifd_index = self.ifds.len();
        let mut ifd = IFD::new(ifd_index, 0);
        BasicTagsBuilder::add_image_tags(&mut ifd, &mut self.tag_data, ifd_index, options, &byte_counts, self.is_big_tiff);

        info!("Adding image IFD #{}: {}x{}x{}, {} chunk(s)",
              ifd_index, options.width, options.height, options.samples_per_pixel, chunks.len());
        self.ifds.push(ifd);
        self.chunks.insert(ifd_index, chunks);
        Ok(ifd_index)
    }

    /// Sets an arbitrary tag on an IFD
    pub fn set_tag(&mut self, ifd_index: usize, tag: u16, data: TagData) -> TiffResult<()> {
        self.check_index(ifd_index)?;
        BasicTagsBuilder::set_tag(&mut self.ifds[ifd_index], &mut self.tag_data, ifd_index, tag, data);
        Ok(())
    }

    /// Georeferences an IFD with pixel scale and tiepoint
    pub fn set_pixel_scale_and_tiepoint(&mut self, ifd_index: usize, scale: [f64; 3], tiepoint: [f64; 6]) -> TiffResult<()> {
        self.check_index(ifd_index)?;
        GeoTagsBuilder::add_pixel_scale_and_tiepoint(&mut self.ifds[ifd_index], &mut self.tag_data, ifd_index, scale, tiepoint);
        Ok(())
    }

    /// Georeferences an IFD with a full model transformation
    pub fn set_model_transformation(&mut self, ifd_index: usize, matrix: [f64; 16]) -> TiffResult<()> {
        self.check_index(ifd_index)?;
        GeoTagsBuilder::add_model_transformation(&mut self.ifds[ifd_index], &mut self.tag_data, ifd_index, matrix);
        Ok(())
    }

    /// Declares the coordinate reference system of an IFD
    pub fn set_geo_keys(&mut self, ifd_index: usize, epsg: u16, geographic: bool) -> TiffResult<()> {
        self.check_index(ifd_index)?;
        GeoTagsBuilder::add_geo_keys(&mut self.ifds[ifd_index], &mut self.tag_data, ifd_index, epsg, geographic);
        Ok(())
    }

    /// Writes the TIFF to any seekable sink
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> TiffResult<()> {
        WriterBuilder::write(writer, self.is_big_tiff, self.byte_order, &self.ifds, &self.tag_data, &self.chunks)
    }

    /// Write the TIFF file to disk
    pub fn write(&self, output_path: &Path) -> TiffResult<()> {
        info!("Writing TIFF to {}", output_path.display());

        let file = File::create(output_path)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
