//! Band decoding from strips and tiles
//!
//! Walks the chunks of an image, decompresses them, undoes horizontal
//! differencing and scatters the requested samples into one `f64` buffer
//! per band.

use std::io::{Read, Seek, SeekFrom};
use log::{debug, trace};

use crate::compression::{CompressionFactory, CompressionHandler};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::builder::ChunkLayout;
use crate::tiff::constants::{predictor, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;
use crate::tiff::validation;
use crate::utils::progress::ProgressTracker;

use super::metadata::{SampleFormat, SampleLayout};

/// Largest band, in pixels, that will be decoded into memory
pub const MAX_BAND_PIXELS: usize = 1 << 30;

/// Largest decoded strip or tile, in bytes
pub const MAX_CHUNK_BYTES: u64 = 1 << 32;

/// Reads band samples of one image IFD
pub struct BandReader<'a> {
    pub reader: &'a mut dyn SeekableReader,
    pub tiff_reader: &'a TiffReader,
    pub ifd: &'a IFD,
    pub layout: &'a SampleLayout,
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    pub file_size: u64,
}

impl BandReader<'_> {
    /// Decodes the given 0-based bands, in the order requested
    ///
    /// Each result holds `width * height` values in row-major order. A band
    /// may be requested more than once.
    pub fn read_bands(&mut self, bands: &[usize], progress: Option<&ProgressTracker>) -> TiffResult<Vec<Vec<f64>>> {
        self.layout.validate()?;
        self.check_sizes()?;
        if let Some(&band) = bands.iter().find(|&&b| b >= self.band_count) {
            return Err(TiffError::GenericError(format!(
                "Band {} out of range, image has {} band(s)", band, self.band_count
            )));
        }

        let (offsets_tag, counts_tag) = match self.layout.chunks {
            ChunkLayout::Strips { .. } => (tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS),
            ChunkLayout::Tiles { .. } => (tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS),
        };
        let tiff_reader = self.tiff_reader;
        let handler = tiff_reader.handler()?;
        let offsets = tiff_reader.read_tag_values(&mut *self.reader, self.ifd, offsets_tag)?;
        let byte_counts = tiff_reader.read_tag_values(&mut *self.reader, self.ifd, counts_tag)?;

        let (_, _, across, down) = self.layout.chunks.grid(self.width, self.height);
        let planes = if self.layout.planar { self.band_count } else { 1 };
        let expected_chunks = planes * across * down;
        if offsets.len() < expected_chunks || byte_counts.len() < expected_chunks {
            return Err(TiffError::GenericError(format!(
                "Image needs {} chunks, found {} offsets and {} byte counts",
                expected_chunks, offsets.len(), byte_counts.len()
            )));
        }

        let decompressor = CompressionFactory::create_handler(self.layout.compression as u64)?;
        debug!("Reading bands {:?} from {} chunk(s) per plane ({})",
               bands, across * down, decompressor.name());
        if let Some(progress) = progress {
            progress.set_length(self.chunks_to_read(bands));
        }

        let mut output = vec![vec![0.0; self.width * self.height]; bands.len()];
        for plane in 0..planes {
            // (output index, sample index within the plane's pixels)
            let targets: Vec<(usize, usize)> = if self.layout.planar {
                bands.iter().enumerate().filter(|(_, b)| **b == plane).map(|(k, _)| (k, 0)).collect()
            } else {
                bands.iter().copied().enumerate().collect()
            };
            if targets.is_empty() {
                continue;
            }

            for cy in 0..down {
                for cx in 0..across {
                    let index = plane * across * down + cy * across + cx;
                    let data = self.read_chunk(decompressor.as_ref(), offsets[index], byte_counts[index], cy)?;
                    self.scatter_chunk(handler, &data, cx, cy, &targets, &mut output);

                    if let Some(progress) = progress {
                        progress.increment(1);
                    }
                }
            }
        }

        Ok(output)
    }

    /// Rejects dimensions whose buffers could not be allocated
    ///
    /// Width, height and tile size come straight from the header, so a
    /// damaged file can claim billions of pixels.
    fn check_sizes(&self) -> TiffResult<()> {
        match self.width.checked_mul(self.height) {
            Some(pixels) if pixels <= MAX_BAND_PIXELS => {},
            _ => return Err(TiffError::ImageTooLarge(format!(
                "{}x{} pixels per band, limit is {}", self.width, self.height, MAX_BAND_PIXELS
            ))),
        }

        let (chunk_width, chunk_height, _, _) = self.layout.chunks.grid(self.width, self.height);
        let chunk_bytes = (chunk_width as u64)
            .checked_mul(chunk_height as u64)
            .and_then(|n| n.checked_mul(self.plane_samples() as u64))
            .and_then(|n| n.checked_mul(self.layout.bytes_per_sample() as u64));
        match chunk_bytes {
            Some(bytes) if bytes <= MAX_CHUNK_BYTES => Ok(()),
            _ => Err(TiffError::ImageTooLarge(format!(
                "{}x{} chunks of {} sample(s), limit is {} bytes",
                chunk_width, chunk_height, self.plane_samples(), MAX_CHUNK_BYTES
            ))),
        }
    }

    /// Number of chunks `read_bands` will decode for the given bands
    pub fn chunks_to_read(&self, bands: &[usize]) -> u64 {
        let (_, _, across, down) = self.layout.chunks.grid(self.width, self.height);
        let planes = if self.layout.planar {
            (0..self.band_count).filter(|p| bands.contains(p)).count()
        } else {
            1
        };
        (planes * across * down) as u64
    }

    /// Decoded size of one plane's samples
    fn plane_samples(&self) -> usize {
        if self.layout.planar { 1 } else { self.band_count }
    }

    /// Rows stored in chunk row `cy`; the last strip may be shorter
    fn chunk_rows(&self, cy: usize) -> usize {
        let (_, chunk_height, _, _) = self.layout.chunks.grid(self.width, self.height);
        match self.layout.chunks {
            ChunkLayout::Strips { .. } => chunk_height.min(self.height - cy * chunk_height),
            ChunkLayout::Tiles { .. } => chunk_height,
        }
    }

    fn read_chunk(
        &mut self,
        decompressor: &dyn CompressionHandler,
        offset: u64,
        byte_count: u64,
        cy: usize
    ) -> TiffResult<Vec<u8>> {
        let (chunk_width, _, _, _) = self.layout.chunks.grid(self.width, self.height);
        let expected = self.chunk_rows(cy) * chunk_width * self.plane_samples() * self.layout.bytes_per_sample();

        validation::validate_chunk_range(offset, byte_count, self.file_size)?;
        trace!("Reading chunk at offset {} ({} bytes, {} expected decoded)", offset, byte_count, expected);

        self.reader.seek(SeekFrom::Start(offset))?;
        let mut compressed = vec![0u8; byte_count as usize];
        self.reader.read_exact(&mut compressed)?;

        let data = decompressor.decompress(&compressed, expected)?;
        if data.len() < expected {
            return Err(TiffError::TruncatedData { expected, actual: data.len() });
        }
        Ok(data)
    }

    /// Copies the targeted samples of a decoded chunk into the band buffers
    fn scatter_chunk(
        &self,
        handler: &dyn ByteOrderHandler,
        data: &[u8],
        cx: usize,
        cy: usize,
        targets: &[(usize, usize)],
        output: &mut [Vec<f64>]
    ) {
        let (chunk_width, chunk_height, _, _) = self.layout.chunks.grid(self.width, self.height);
        let spp = self.plane_samples();
        let bytes = self.layout.bytes_per_sample();
        let row_bytes = chunk_width * spp * bytes;

        let mut patterns = vec![0u64; chunk_width * spp];
        for r in 0..self.chunk_rows(cy) {
            let row = cy * chunk_height + r;
            if row >= self.height {
                break;
            }

            let row_data = &data[r * row_bytes..(r + 1) * row_bytes];
            for (i, pattern) in patterns.iter_mut().enumerate() {
                let buf = &row_data[i * bytes..(i + 1) * bytes];
                *pattern = match bytes {
                    1 => buf[0] as u64,
                    2 => handler.decode_u16(buf) as u64,
                    4 => handler.decode_u32(buf) as u64,
                    _ => handler.decode_u64(buf),
                };
            }

            if self.layout.predictor == predictor::HORIZONTAL_DIFFERENCING {
                let mask = self.layout.sample_mask();
                for i in spp..patterns.len() {
                    patterns[i] = patterns[i].wrapping_add(patterns[i - spp]) & mask;
                }
            }

            for c in 0..chunk_width {
                let col = cx * chunk_width + c;
                if col >= self.width {
                    break;
                }
                for &(k, s) in targets {
                    output[k][row * self.width + col] = self.to_value(patterns[c * spp + s]);
                }
            }
        }
    }

    /// Interprets a bit pattern according to the sample format
    fn to_value(&self, pattern: u64) -> f64 {
        let bits = self.layout.bits_per_sample as u32;
        match self.layout.format {
            SampleFormat::Float if bits == 32 => f32::from_bits(pattern as u32) as f64,
            SampleFormat::Float => f64::from_bits(pattern),
            SampleFormat::Signed => {
                let shift = 64 - bits;
                ((pattern << shift) as i64 >> shift) as f64
            },
            SampleFormat::Unsigned => pattern as f64,
        }
    }
}
