//! Mutual exclusion around an engine

use std::sync::Mutex;

use crate::errors::{GeoSegError, GeoSegResult};
use crate::raster::NormalizedImage;

use super::engine::{MaskSet, PromptPoint, SegmentationEngine};

/// Runs at most one prediction at a time on the wrapped engine
pub struct SerializedEngine {
    name: String,
    inner: Mutex<Box<dyn SegmentationEngine>>,
}

impl SerializedEngine {
    pub fn new(engine: Box<dyn SegmentationEngine>) -> Self {
        SerializedEngine {
            name: engine.name().to_string(),
            inner: Mutex::new(engine),
        }
    }
}

impl SegmentationEngine for SerializedEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, image: &NormalizedImage, points: &[PromptPoint], multimask_output: bool) -> GeoSegResult<MaskSet> {
        let engine = self.inner.lock()
            .map_err(|_| GeoSegError::segmentation(&self.name, "engine lock poisoned by an earlier panic"))?;
        engine.predict(image, points, multimask_output)
    }
}
