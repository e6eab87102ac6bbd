//! The segmentation engine seam
//!
//! An engine turns a prepared RGB image and a set of labelled prompt
//! points into candidate masks. `predict` wraps any engine with the checks
//! every caller needs.

use std::fmt;
use log::{debug, info};

use crate::errors::{GeoSegError, GeoSegResult};
use crate::raster::NormalizedImage;

/// Whether a prompt point marks the object or its surroundings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLabel {
    Background = 0,
    Foreground = 1,
}

/// A labelled pixel; `x` is the column and `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptPoint {
    pub x: usize,
    pub y: usize,
    pub label: PointLabel,
}

impl PromptPoint {
    pub fn new(x: usize, y: usize, label: PointLabel) -> Self {
        PromptPoint { x, y, label }
    }

    pub fn foreground(x: usize, y: usize) -> Self {
        Self::new(x, y, PointLabel::Foreground)
    }

    /// Foreground point at pixel `(height / 2, width / 2)`
    pub fn center_of(image: &NormalizedImage) -> Self {
        Self::foreground(image.width() / 2, image.height() / 2)
    }
}

impl fmt::Display for PromptPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {:?}", self.x, self.y, self.label)
    }
}

/// A boolean grid with the size of the image it was predicted for
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<bool>,
    /// Engine quality estimate, higher is better
    pub score: Option<f32>,
}

impl Mask {
    /// Row-major mask; `None` if the length does not match
    pub fn new(width: usize, height: usize, data: Vec<bool>) -> Option<Self> {
        (data.len() == width * height).then_some(Mask { width, height, data, score: None })
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[bool] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.width + col]
    }

    /// Number of pixels inside the mask
    pub fn area(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Mask as 0/255 bytes, row-major
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().map(|&v| if v { 255 } else { 0 }).collect()
    }
}

/// Candidate masks in engine order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskSet {
    masks: Vec<Mask>,
}

impl MaskSet {
    pub fn new(masks: Vec<Mask>) -> Self {
        MaskSet { masks }
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mask> {
        self.masks.iter()
    }

    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    pub fn into_masks(self) -> Vec<Mask> {
        self.masks
    }

    /// Index of the highest scoring mask, the first one when unscored
    pub fn best_index(&self) -> Option<usize> {
        if self.masks.is_empty() {
            return None;
        }
        let mut best = 0;
        for (i, mask) in self.masks.iter().enumerate() {
            if mask.score.unwrap_or(f32::NEG_INFINITY) > self.masks[best].score.unwrap_or(f32::NEG_INFINITY) {
                best = i;
            }
        }
        Some(best)
    }
}

impl<'a> IntoIterator for &'a MaskSet {
    type Item = &'a Mask;
    type IntoIter = std::slice::Iter<'a, Mask>;

    fn into_iter(self) -> Self::IntoIter {
        self.masks.iter()
    }
}

/// A promptable segmentation model
///
/// Engines are loaded once and shared read-only, so prediction takes
/// `&self`.
pub trait SegmentationEngine: Send + Sync {
    /// Registry name of the model variant
    fn name(&self) -> &str;

    /// Candidate masks for `image` given labelled prompt points
    ///
    /// Callers guarantee at least one point, all inside the image.
    fn predict(&self, image: &NormalizedImage, points: &[PromptPoint], multimask_output: bool) -> GeoSegResult<MaskSet>;
}

/// Runs an engine with prompt and result validation
///
/// With `multimask_output` off only the best candidate is kept. Every
/// returned mask has the image's height and width.
pub fn predict(
    engine: &dyn SegmentationEngine,
    image: &NormalizedImage,
    points: &[PromptPoint],
    multimask_output: bool
) -> GeoSegResult<MaskSet> {
    if points.is_empty() {
        return Err(GeoSegError::segmentation(engine.name(), "no prompt points given"));
    }
    if let Some(point) = points.iter().find(|p| p.x >= image.width() || p.y >= image.height()) {
        return Err(GeoSegError::segmentation(engine.name(), format!(
            "prompt point {} outside {}x{} image", point, image.width(), image.height()
        )));
    }

    debug!("Predicting with {} for {} point(s)", engine.name(), points.len());
    let masks = engine.predict(image, points, multimask_output)?;

    if masks.is_empty() {
        return Err(GeoSegError::segmentation(engine.name(), "engine returned no masks"));
    }
    if let Some(mask) = masks.iter().find(|m| m.width() != image.width() || m.height() != image.height()) {
        return Err(GeoSegError::segmentation(engine.name(), format!(
            "mask of {}x{} does not match {}x{} image",
            mask.width(), mask.height(), image.width(), image.height()
        )));
    }

    let masks = match (multimask_output, masks.best_index()) {
        (false, Some(best)) => MaskSet::new(vec![masks.into_masks().swap_remove(best)]),
        _ => masks,
    };
    info!("{} produced {} mask(s)", engine.name(), masks.len());
    Ok(masks)
}
