//! Structural metadata of a multiband raster

use std::fmt;

use crate::coordinate::AffineTransform;
use crate::compression::CompressionFactory;
use crate::io::seekable::SeekableReader;
use crate::tiff::builder::ChunkLayout;
use crate::tiff::constants::{planar_config, predictor, sample_format, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;
use crate::utils::tag_utils;

/// Interpretation of one sample's bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Unsigned,
    Signed,
    Float,
}

impl SampleFormat {
    pub fn from_code(code: u64) -> Option<Self> {
        match u16::try_from(code).ok()? {
            sample_format::UNSIGNED => Some(SampleFormat::Unsigned),
            sample_format::SIGNED => Some(SampleFormat::Signed),
            sample_format::IEEEFP => Some(SampleFormat::Float),
            _ => None,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            SampleFormat::Unsigned => sample_format::UNSIGNED,
            SampleFormat::Signed => sample_format::SIGNED,
            SampleFormat::Float => sample_format::IEEEFP,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleFormat::Unsigned => write!(f, "unsigned"),
            SampleFormat::Signed => write!(f, "signed"),
            SampleFormat::Float => write!(f, "float"),
        }
    }
}

/// How the samples of an image are encoded in the file
#[derive(Debug, Clone, PartialEq)]
pub struct SampleLayout {
    pub bits_per_sample: u16,
    pub format: SampleFormat,
    /// PlanarConfiguration 2: one plane per band
    pub planar: bool,
    pub compression: u16,
    pub predictor: u16,
    pub chunks: ChunkLayout,
}

impl SampleLayout {
    /// Reads the sample layout tags of an image IFD
    ///
    /// Fails when samples differ in depth or format between bands, or when
    /// a tag holds a value outside its defined range. Whether the layout
    /// can actually be decoded is left to `validate`.
    pub fn from_ifd(tiff_reader: &TiffReader, reader: &mut dyn SeekableReader, ifd: &IFD) -> TiffResult<Self> {
        let (_, height) = ifd.get_dimensions().ok_or(TiffError::MissingDimensions)?;

        let bits_per_sample = Self::uniform(tiff_reader, reader, ifd, tags::BITS_PER_SAMPLE, 1, "BitsPerSample")?;
        let format_code = Self::uniform(tiff_reader, reader, ifd, tags::SAMPLE_FORMAT, sample_format::UNSIGNED as u64, "SampleFormat")?;
        let format = SampleFormat::from_code(format_code)
            .ok_or_else(|| TiffError::UnsupportedSampleLayout(format!("SampleFormat {}", format_code)))?;

        let planar = match tiff_reader.read_tag_or(reader, ifd, tags::PLANAR_CONFIGURATION, planar_config::CHUNKY as u64)? {
            code if code == planar_config::CHUNKY as u64 => false,
            code if code == planar_config::PLANAR as u64 => true,
            code => return Err(TiffError::UnsupportedSampleLayout(format!("PlanarConfiguration {}", code))),
        };

        let compression = tiff_reader.read_tag_or(reader, ifd, tags::COMPRESSION, 1)?;
        let predictor = tiff_reader.read_tag_or(reader, ifd, tags::PREDICTOR, predictor::NONE as u64)?;

        let chunks = if ifd.is_tiled() {
            ChunkLayout::Tiles {
                width: tiff_reader.read_tag_or(reader, ifd, tags::TILE_WIDTH, 0)? as u32,
                height: tiff_reader.read_tag_or(reader, ifd, tags::TILE_LENGTH, 0)? as u32,
            }
        } else {
            let rows = tiff_reader.read_tag_or(reader, ifd, tags::ROWS_PER_STRIP, height)?;
            ChunkLayout::Strips { rows_per_strip: rows.min(height).min(u32::MAX as u64) as u32 }
        };

        Ok(SampleLayout {
            bits_per_sample: bits_per_sample.min(u16::MAX as u64) as u16,
            format,
            planar,
            compression: compression.min(u16::MAX as u64) as u16,
            predictor: predictor.min(u16::MAX as u64) as u16,
            chunks,
        })
    }

    /// Reads a per-sample tag whose values must all agree
    fn uniform(
        tiff_reader: &TiffReader,
        reader: &mut dyn SeekableReader,
        ifd: &IFD,
        tag: u16,
        default: u64,
        name: &str
    ) -> TiffResult<u64> {
        if !ifd.has_tag(tag) {
            return Ok(default);
        }
        let values = tiff_reader.read_tag_values(reader, ifd, tag)?;
        let first = values.first().copied().unwrap_or(default);
        if values.iter().any(|&v| v != first) {
            return Err(TiffError::UnsupportedSampleLayout(format!("mixed {} {:?}", name, values)));
        }
        Ok(first)
    }

    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_sample / 8) as usize
    }

    /// Mask of the valid bits of one sample
    pub fn sample_mask(&self) -> u64 {
        if self.bits_per_sample >= 64 { u64::MAX } else { (1u64 << self.bits_per_sample) - 1 }
    }

    /// Checks that the band reader can decode this layout
    pub fn validate(&self) -> TiffResult<()> {
        let valid_depth = match self.format {
            SampleFormat::Float => matches!(self.bits_per_sample, 32 | 64),
            SampleFormat::Unsigned | SampleFormat::Signed => matches!(self.bits_per_sample, 8 | 16 | 32 | 64),
        };
        if !valid_depth {
            return Err(TiffError::UnsupportedSampleLayout(format!(
                "{}-bit {} samples", self.bits_per_sample, self.format
            )));
        }

        match self.predictor {
            predictor::NONE => {},
            predictor::HORIZONTAL_DIFFERENCING if self.format != SampleFormat::Float => {},
            other => return Err(TiffError::UnsupportedSampleLayout(format!(
                "Predictor {} on {} samples", other, self.format
            ))),
        }

        if let ChunkLayout::Tiles { width, height } = self.chunks {
            if width == 0 || height == 0 {
                return Err(TiffError::UnsupportedSampleLayout(format!("{}x{} tiles", width, height)));
            }
        }

        if !CompressionFactory::is_supported(self.compression as u64) {
            return Err(TiffError::UnsupportedCompression(self.compression as u64));
        }

        Ok(())
    }
}

impl fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit {}, {}, {}",
               self.bits_per_sample, self.format,
               if self.planar { "planar" } else { "chunky" },
               tag_utils::get_compression_name(self.compression as u64))?;
        if self.predictor != predictor::NONE {
            write!(f, ", predictor {}", self.predictor)?;
        }
        match self.chunks {
            ChunkLayout::Strips { rows_per_strip } => write!(f, ", strips of {} rows", rows_per_strip),
            ChunkLayout::Tiles { width, height } => write!(f, ", {}x{} tiles", width, height),
        }
    }
}

/// Everything known about a raster without reading its pixels
#[derive(Debug, Clone, PartialEq)]
pub struct RasterMetadata {
    pub band_count: usize,
    pub width: usize,
    pub height: usize,
    /// `None` when the file carries no usable georeferencing
    pub transform: Option<AffineTransform>,
    pub sample: SampleLayout,
    pub epsg: Option<u32>,
}
