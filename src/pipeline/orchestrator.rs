//! The segmentation pipeline
//!
//! One call runs the whole request: prepare the image, prompt the engine
//! at the image centre, and map that same pixel to a geographic
//! coordinate.

use std::path::Path;
use log::info;

use crate::coordinate::CoordinateMapper;
use crate::errors::GeoSegResult;
use crate::raster::{NormalizedImage, RasterReader, DEFAULT_MAX_IMAGE_SIZE};
use crate::segmentation::{self, MaskSet, PromptPoint, SegmentationEngine, SerializedEngine};

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationResult {
    pub masks: MaskSet,
    pub lat: f64,
    pub lon: f64,
    /// Prompt used, in prepared image pixels
    pub prompt: PromptPoint,
    pub image_width: usize,
    pub image_height: usize,
}

/// Runs rasters through an engine loaded once up front
pub struct Pipeline {
    engine: SerializedEngine,
    reader: RasterReader,
    max_image_size: usize,
    bands: Option<Vec<u32>>,
    multimask_output: bool,
}

impl Pipeline {
    pub fn new(engine: Box<dyn SegmentationEngine>) -> Self {
        Pipeline {
            engine: SerializedEngine::new(engine),
            reader: RasterReader::new(),
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            bands: None,
            multimask_output: true,
        }
    }

    pub fn with_max_image_size(mut self, max_image_size: usize) -> Self {
        self.max_image_size = max_image_size;
        self
    }

    /// Fixed 1-based band selection instead of the default heuristic
    pub fn with_bands(mut self, bands: Option<Vec<u32>>) -> Self {
        self.bands = bands;
        self
    }

    pub fn with_multimask_output(mut self, multimask_output: bool) -> Self {
        self.multimask_output = multimask_output;
        self
    }

    pub fn with_reader(mut self, reader: RasterReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn engine(&self) -> &dyn SegmentationEngine {
        &self.engine
    }

    /// Prepared image only, as the engine would see it
    pub fn prepare(&self, path: &Path) -> GeoSegResult<NormalizedImage> {
        self.reader.read_normalized(path, self.bands.as_deref(), self.max_image_size)
    }

    /// Segments the raster at `path` and locates its centre pixel
    ///
    /// The centre is taken on the prepared image while the transform is
    /// the full-resolution one, so for downscaled rasters the coordinate
    /// is that of pixel (h'/2, w'/2) of the original grid.
    pub fn process(&self, path: &Path) -> GeoSegResult<SegmentationResult> {
        info!("Processing {}", path.display());
        let image = self.prepare(path)?;

        let prompt = PromptPoint::center_of(&image);
        let masks = segmentation::predict(&self.engine, &image, &[prompt], self.multimask_output)?;

        let transform = self.reader.get_transform(path)?;
        let point = CoordinateMapper::pixel_to_geo(&transform, prompt.y, prompt.x);
        info!("Centre pixel ({}, {}) maps to {}", prompt.y, prompt.x, point);

        Ok(SegmentationResult {
            masks,
            lat: point.lat,
            lon: point.lon,
            prompt,
            image_width: image.width(),
            image_height: image.height(),
        })
    }
}
