//! Path-level raster operations
//!
//! Every call opens the file, does its work and closes it again; no handle
//! outlives a call.

use std::path::Path;
use log::{debug, info};

use crate::coordinate::AffineTransform;
use crate::errors::{GeoSegError, GeoSegResult};
use crate::utils::progress::ProgressTracker;

use super::band_selection::BandSelection;
use super::metadata::RasterMetadata;
use super::normalize::{self, NormalizedImage};
use super::resize;
use super::source::RasterSource;

/// Default bound on the longer side of a prepared image
pub const DEFAULT_MAX_IMAGE_SIZE: usize = 2048;

/// Reads multiband rasters into model-ready images
#[derive(Debug, Clone, Default)]
pub struct RasterReader {
    show_progress: bool,
}

impl RasterReader {
    pub fn new() -> Self {
        RasterReader { show_progress: false }
    }

    /// Draws a progress bar while bands are decoded
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn open(path: &Path) -> GeoSegResult<RasterSource> {
        RasterSource::open(path).map_err(|e| GeoSegError::raster_open(path, e))
    }

    /// Band count, dimensions, sample layout, EPSG code and transform
    pub fn open_metadata(&self, path: &Path) -> GeoSegResult<RasterMetadata> {
        let mut source = Self::open(path)?;
        source.metadata().map_err(|e| GeoSegError::raster_read(path, e))
    }

    /// Reads three bands, rescales each to 8 bit and stacks them
    ///
    /// `bands` are 1-based; `None` picks the default heuristic. The result
    /// is shrunk so neither side exceeds `max_image_size`.
    pub fn read_normalized(&self, path: &Path, bands: Option<&[u32]>, max_image_size: usize) -> GeoSegResult<NormalizedImage> {
        if max_image_size == 0 {
            return Err(GeoSegError::raster_read(path, "maximum image size must be at least 1"));
        }

        let mut source = Self::open(path)?;
        let (width, height) = source.dimensions();
        let selection = BandSelection::resolve(bands, source.band_count())
            .map_err(|e| GeoSegError::raster_read(path, e))?;
        info!("Reading bands {} of {} from {}", selection, source.band_count(), path.display());

        let progress = self.show_progress.then(|| ProgressTracker::new(0, "Reading bands"));
        let raw = source.read_bands(&selection.zero_based(), progress.as_ref())
            .map_err(|e| GeoSegError::raster_read(path, e))?;
        if let Some(progress) = &progress {
            progress.finish();
        }
        drop(source);

        let channels: Vec<Vec<u8>> = raw.iter().map(|band| normalize::normalize_band(band)).collect();
        let image = NormalizedImage::from_bands(width, height, [channels[0].as_slice(), channels[1].as_slice(), channels[2].as_slice()])
            .ok_or_else(|| GeoSegError::raster_read(path, "decoded bands do not match the image size"))?;

        let image = resize::resize_to_fit(image, max_image_size);
        debug!("Prepared image shape {:?}", image.shape());
        Ok(image)
    }

    /// Pixel-to-world transform of the raster
    pub fn get_transform(&self, path: &Path) -> GeoSegResult<AffineTransform> {
        let mut source = Self::open(path)?;
        let geo_info = source.geo_info()
            .map_err(|e| GeoSegError::invalid_transform(path, e))?;
        AffineTransform::from_geo_info(&geo_info)
            .map_err(|e| GeoSegError::from((path.to_path_buf(), e)))
    }
}
