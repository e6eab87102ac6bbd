//! Strip and tile encoding
//!
//! Splits a pixel-interleaved sample buffer into the chunks described by
//! an `ImageOptions`, applying the predictor and compression of the image.

use log::debug;

use crate::compression::CompressionFactory;
use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::builder::{ChunkLayout, ImageOptions};
use crate::tiff::constants::{predictor, sample_format};
use crate::tiff::errors::{TiffError, TiffResult};

/// Encodes sample values into compressed strips or tiles
pub struct ChunkEncoder<'a> {
    options: &'a ImageOptions,
    handler: &'a dyn ByteOrderHandler,
}

impl<'a> ChunkEncoder<'a> {
    pub fn new(options: &'a ImageOptions, handler: &'a dyn ByteOrderHandler) -> Self {
        ChunkEncoder { options, handler }
    }

    /// Encodes `samples`, laid out as `(row * width + col) * spp + band`
    ///
    /// Chunks are returned in file order: for planar images all chunks of
    /// the first band come first. Tiles are zero-padded past the image edge.
    pub fn encode(&self, samples: &[f64]) -> TiffResult<Vec<Vec<u8>>> {
        let o = self.options;
        let width = o.width as usize;
        let height = o.height as usize;
        let spp = o.samples_per_pixel as usize;

        if samples.len() != width * height * spp {
            return Err(TiffError::GenericError(format!(
                "Expected {} samples for {}x{}x{}, got {}",
                width * height * spp, width, height, spp, samples.len()
            )));
        }

        let compressor = CompressionFactory::create_handler(o.compression as u64)?;
        let (chunk_width, chunk_height, across, down) = o.chunk_grid();
        let (planes, plane_spp) = if o.planar { (spp, 1) } else { (1, spp) };

        let mut chunks = Vec::with_capacity(planes * across * down);
        for plane in 0..planes {
            for cy in 0..down {
                for cx in 0..across {
                    let rows = match o.layout {
                        ChunkLayout::Strips { .. } => chunk_height.min(height - cy * chunk_height),
                        ChunkLayout::Tiles { .. } => chunk_height,
                    };

                    let mut raw = Vec::with_capacity(rows * chunk_width * plane_spp * o.bytes_per_sample());
                    for r in 0..rows {
                        let row = cy * chunk_height + r;
                        let mut patterns = Vec::with_capacity(chunk_width * plane_spp);
                        for c in 0..chunk_width {
                            let col = cx * chunk_width + c;
                            for s in 0..plane_spp {
                                let band = if o.planar { plane } else { s };
                                let pattern = if row < height && col < width {
                                    self.to_pattern(samples[(row * width + col) * spp + band])
                                } else {
                                    0
                                };
                                patterns.push(pattern);
                            }
                        }

                        if o.predictor == predictor::HORIZONTAL_DIFFERENCING {
                            let mask = o.sample_mask();
                            for i in (plane_spp..patterns.len()).rev() {
                                patterns[i] = patterns[i].wrapping_sub(patterns[i - plane_spp]) & mask;
                            }
                        }

                        for pattern in patterns {
                            self.push_pattern(&mut raw, pattern);
                        }
                    }

                    chunks.push(compressor.compress(&raw)?);
                }
            }
        }

        debug!("Encoded {} chunk(s) with {}", chunks.len(), compressor.name());
        Ok(chunks)
    }

    /// Bit pattern of one sample at the image's bit depth
    fn to_pattern(&self, value: f64) -> u64 {
        let o = self.options;
        match o.sample_format {
            sample_format::IEEEFP if o.bits_per_sample == 32 => (value as f32).to_bits() as u64,
            sample_format::IEEEFP => value.to_bits(),
            sample_format::SIGNED => (value.round() as i64) as u64 & o.sample_mask(),
            _ => (value.round() as u64) & o.sample_mask(),
        }
    }

    fn push_pattern(&self, out: &mut Vec<u8>, pattern: u64) {
        let start = out.len();
        let size = self.options.bytes_per_sample();
        out.resize(start + size, 0);
        let buf = &mut out[start..];
        match size {
            1 => buf[0] = pattern as u8,
            2 => self.handler.encode_u16(buf, pattern as u16),
            4 => self.handler.encode_u32(buf, pattern as u32),
            _ => self.handler.encode_u64(buf, pattern),
        }
    }
}
