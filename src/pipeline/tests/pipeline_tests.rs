//! Tests for the end-to-end pipeline with a stub engine

extern crate std;

use std::fs;
use std::sync::Mutex;

use crate::coordinate::AffineTransform;
use crate::errors::{GeoSegError, GeoSegResult};
use crate::pipeline::Pipeline;
use crate::raster::tests::fixtures;
use crate::raster::NormalizedImage;
use crate::segmentation::{Mask, MaskSet, PointLabel, PromptPoint, SegmentationEngine};
use crate::tiff::builder::ImageOptions;

/// Marks everything left of the prompt column and remembers its inputs
#[derive(Default)]
struct RecordingEngine {
    seen: Mutex<Vec<((usize, usize, usize), Vec<PromptPoint>)>>,
}

impl SegmentationEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    fn predict(&self, image: &NormalizedImage, points: &[PromptPoint], _multimask: bool) -> GeoSegResult<MaskSet> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push((image.shape(), points.to_vec()));
        }
        let (w, h) = (image.width(), image.height());
        let data = (0..w * h).map(|i| i % w < points[0].x).collect();
        let first = Mask::new(w, h, data).unwrap().with_score(0.8);
        let second = Mask::new(w, h, vec![true; w * h]).unwrap().with_score(0.3);
        Ok(MaskSet::new(vec![first, second]))
    }
}

struct FailingEngine;

impl SegmentationEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn predict(&self, _image: &NormalizedImage, _points: &[PromptPoint], _multimask: bool) -> GeoSegResult<MaskSet> {
        Err(GeoSegError::segmentation("failing", "model crashed"))
    }
}

#[test]
fn test_process_six_band_raster() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(100, 100, 6), true);

    let pipeline = Pipeline::new(Box::new(RecordingEngine::default()));
    let result = pipeline.process(&path).unwrap();

    std::assert_eq!((result.image_height, result.image_width), (100, 100));
    std::assert_eq!(result.prompt, PromptPoint::new(50, 50, PointLabel::Foreground));
    std::assert_eq!(result.masks.len(), 2);
    for mask in &result.masks {
        std::assert_eq!((mask.height(), mask.width()), (100, 100));
    }
    std::assert_eq!(result.masks.masks()[0].area(), 50 * 100);

    let transform = AffineTransform::from_origin(500000.0, 4649776.0, 30.0, -30.0).unwrap();
    let (x, y) = transform.apply(50.0, 50.0);
    std::assert_eq!((result.lat, result.lon), (y, x));
}

#[test]
fn test_process_single_mask() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(20, 10, 4), true);

    let pipeline = Pipeline::new(Box::new(RecordingEngine::default())).with_multimask_output(false);
    let result = pipeline.process(&path).unwrap();
    std::assert_eq!(result.masks.len(), 1);
    std::assert_eq!(result.masks.masks()[0].score, Some(0.8));
    std::assert_eq!(result.prompt, PromptPoint::foreground(10, 5));
}

#[test]
fn test_centre_of_downscaled_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "large.tif", &ImageOptions::new(200, 100, 3), true);

    let engine = RecordingEngine::default();
    let pipeline = Pipeline::new(Box::new(engine)).with_max_image_size(50);
    let result = pipeline.process(&path).unwrap();

    std::assert_eq!((result.image_width, result.image_height), (50, 25));
    std::assert_eq!(result.prompt, PromptPoint::foreground(25, 12));

    // The full-resolution transform is applied to the resized centre
    std::assert_eq!(result.lon, 500000.0 + 25.0 * 30.0);
    std::assert_eq!(result.lat, 4649776.0 - 12.0 * 30.0);
}

#[test]
fn test_explicit_bands_reach_reader() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(8, 8, 3), true);

    let pipeline = Pipeline::new(Box::new(RecordingEngine::default())).with_bands(Some(vec![3, 2, 9]));
    std::assert!(matches!(pipeline.process(&path), Err(GeoSegError::RasterRead { .. })));
}

#[test]
fn test_text_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.tif");
    fs::write(&path, "hello").unwrap();

    let pipeline = Pipeline::new(Box::new(RecordingEngine::default()));
    let error = pipeline.process(&path).unwrap_err();
    std::assert!(matches!(error, GeoSegError::RasterOpen { .. }));
    std::assert_eq!(error.stage(), "open");
}

#[test]
fn test_missing_transform() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "plain.tif", &ImageOptions::new(8, 8, 3), false);

    let pipeline = Pipeline::new(Box::new(RecordingEngine::default()));
    std::assert!(matches!(pipeline.process(&path), Err(GeoSegError::InvalidTransform { .. })));
}

#[test]
fn test_engine_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_raster(dir.path(), "scene.tif", &ImageOptions::new(8, 8, 3), true);

    let pipeline = Pipeline::new(Box::new(FailingEngine));
    match pipeline.process(&path) {
        Err(GeoSegError::Segmentation { context, reason }) => {
            std::assert_eq!(context, "failing");
            std::assert_eq!(reason, "model crashed");
        },
        other => std::panic!("unexpected result {:?}", other.map(|r| r.masks.len())),
    }
}
