//! Colour-similarity region growing
//!
//! A model-free engine: the region is grown from the foreground prompt
//! points over neighbours whose colour stays within a tolerance of the
//! seed colour. Each configured tolerance yields one candidate mask.
//!
//! Checkpoint format:
//!
//! ```toml
//! [region_grow]
//! tolerances = [16.0, 32.0, 64.0]
//! connectivity = 8
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use log::{debug, info};

use crate::errors::{GeoSegError, GeoSegResult};
use crate::raster::NormalizedImage;

use super::engine::{Mask, MaskSet, PointLabel, PromptPoint, SegmentationEngine};

pub const VARIANT: &str = "region_grow";

const DEFAULT_TOLERANCES: [f32; 3] = [16.0, 32.0, 64.0];

/// Region growing engine configured by tolerance and pixel connectivity
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGrowEngine {
    tolerances: Vec<f32>,
    connectivity: u8,
}

impl Default for RegionGrowEngine {
    fn default() -> Self {
        RegionGrowEngine {
            tolerances: DEFAULT_TOLERANCES.to_vec(),
            connectivity: 8,
        }
    }
}

impl RegionGrowEngine {
    /// Tolerances are RGB euclidean distances; connectivity is 4 or 8
    pub fn new(tolerances: Vec<f32>, connectivity: u8) -> GeoSegResult<Self> {
        if tolerances.is_empty() || tolerances.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(GeoSegError::segmentation(VARIANT, format!("invalid tolerances {:?}", tolerances)));
        }
        if connectivity != 4 && connectivity != 8 {
            return Err(GeoSegError::segmentation(VARIANT, format!("connectivity must be 4 or 8, got {}", connectivity)));
        }
        Ok(RegionGrowEngine { tolerances, connectivity })
    }

    /// Loads the engine parameters from a TOML checkpoint file
    pub fn from_checkpoint(path: &Path) -> GeoSegResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| GeoSegError::segmentation(
            format!("{} checkpoint {}", VARIANT, path.display()), e
        ))?;
        let engine = Self::from_toml(&content).map_err(|e| match e {
            GeoSegError::Segmentation { reason, .. } => GeoSegError::segmentation(
                format!("{} checkpoint {}", VARIANT, path.display()), reason
            ),
            other => other,
        })?;
        info!("Loaded {} checkpoint {} (tolerances {:?}, {}-connected)",
              VARIANT, path.display(), engine.tolerances, engine.connectivity);
        Ok(engine)
    }

    /// Parses checkpoint contents; absent keys keep their defaults
    pub fn from_toml(content: &str) -> GeoSegResult<Self> {
        let document: toml::Table = content.parse()
            .map_err(|e| GeoSegError::segmentation(VARIANT, format!("Failed to parse TOML: {}", e)))?;
        let defaults = Self::default();
        let section = match document.get(VARIANT) {
            Some(section) => section,
            None => return Ok(defaults),
        };

        let tolerances = match section.get("tolerances") {
            Some(toml::Value::Array(items)) => items.iter()
                .map(|item| match item {
                    toml::Value::Float(f) => Ok(*f as f32),
                    toml::Value::Integer(i) => Ok(*i as f32),
                    other => Err(GeoSegError::segmentation(VARIANT, format!("tolerance {} is not a number", other))),
                })
                .collect::<GeoSegResult<Vec<f32>>>()?,
            Some(other) => return Err(GeoSegError::segmentation(VARIANT, format!("tolerances must be an array, got {}", other))),
            None => defaults.tolerances,
        };

        let connectivity = match section.get("connectivity") {
            Some(value) => value.as_integer()
                .and_then(|c| u8::try_from(c).ok())
                .ok_or_else(|| GeoSegError::segmentation(VARIANT, format!("invalid connectivity {}", value)))?,
            None => defaults.connectivity,
        };

        Self::new(tolerances, connectivity)
    }

    pub fn tolerances(&self) -> &[f32] {
        &self.tolerances
    }

    fn neighbours(&self) -> &'static [(isize, isize)] {
        const FOUR: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(isize, isize); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
        if self.connectivity == 4 { &FOUR } else { &EIGHT }
    }

    /// Grows one region at `tolerance` from the foreground seeds
    fn grow(&self, image: &NormalizedImage, seeds: &[PromptPoint], fg: [f32; 3], bg: Option<[f32; 3]>, tolerance: f32) -> Vec<bool> {
        let (width, height) = (image.width(), image.height());
        let mut inside = vec![false; width * height];
        let mut blocked = vec![false; width * height];
        for point in seeds.iter().filter(|p| p.label == PointLabel::Background) {
            blocked[point.y * width + point.x] = true;
        }

        let mut queue = VecDeque::new();
        for point in seeds.iter().filter(|p| p.label == PointLabel::Foreground) {
            let index = point.y * width + point.x;
            if !inside[index] {
                inside[index] = true;
                queue.push_back((point.y, point.x));
            }
        }

        while let Some((row, col)) = queue.pop_front() {
            for &(dr, dc) in self.neighbours() {
                let (r, c) = (row as isize + dr, col as isize + dc);
                if r < 0 || c < 0 || r >= height as isize || c >= width as isize {
                    continue;
                }
                let (r, c) = (r as usize, c as usize);
                let index = r * width + c;
                if inside[index] || blocked[index] {
                    continue;
                }

                let colour = to_colour(image.pixel(r, c));
                let to_fg = distance(colour, fg);
                if to_fg > tolerance || bg.is_some_and(|bg| distance(colour, bg) < to_fg) {
                    continue;
                }
                inside[index] = true;
                queue.push_back((r, c));
            }
        }

        inside
    }
}

fn to_colour(pixel: [u8; 3]) -> [f32; 3] {
    [pixel[0] as f32, pixel[1] as f32, pixel[2] as f32]
}

fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

/// Mean colour of the prompt points with `label`
fn mean_colour(image: &NormalizedImage, points: &[PromptPoint], label: PointLabel) -> Option<[f32; 3]> {
    let colours: Vec<[f32; 3]> = points.iter()
        .filter(|p| p.label == label)
        .map(|p| to_colour(image.pixel(p.y, p.x)))
        .collect();
    if colours.is_empty() {
        return None;
    }
    let n = colours.len() as f32;
    let sum = colours.iter().fold([0.0; 3], |acc, c| [acc[0] + c[0], acc[1] + c[1], acc[2] + c[2]]);
    Some([sum[0] / n, sum[1] / n, sum[2] / n])
}

impl SegmentationEngine for RegionGrowEngine {
    fn name(&self) -> &str {
        VARIANT
    }

    /// One mask per tolerance, in configured order
    ///
    /// Scores measure stability: the area ratio between a mask and the
    /// mask grown at the neighbouring tolerance.
    fn predict(&self, image: &NormalizedImage, points: &[PromptPoint], multimask_output: bool) -> GeoSegResult<MaskSet> {
        let fg = mean_colour(image, points, PointLabel::Foreground)
            .ok_or_else(|| GeoSegError::segmentation(VARIANT, "at least one foreground point is required"))?;
        let bg = mean_colour(image, points, PointLabel::Background);

        let tolerances: &[f32] = if multimask_output { &self.tolerances } else { &self.tolerances[..1] };
        let grown: Vec<Vec<bool>> = tolerances.iter()
            .map(|&tolerance| self.grow(image, points, fg, bg, tolerance))
            .collect();

        let areas: Vec<usize> = grown.iter().map(|m| m.iter().filter(|&&v| v).count()).collect();
        debug!("Region areas per tolerance: {:?}", areas);

        let mut sorted_tolerances: Vec<(usize, f32)> = tolerances.iter().copied().enumerate().collect();
        sorted_tolerances.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut masks = Vec::with_capacity(grown.len());
        for (i, data) in grown.into_iter().enumerate() {
            let rank = sorted_tolerances.iter().position(|&(j, _)| j == i).unwrap_or(0);
            // (tighter area, looser area) of this candidate and its next looser neighbour
            let pair = match sorted_tolerances.get(rank + 1) {
                Some(&(looser, _)) => Some((areas[i], areas[looser])),
                // The loosest candidate is compared with the next tighter one
                None if rank > 0 => Some((areas[sorted_tolerances[rank - 1].0], areas[i])),
                None => None,
            };
            let score = match pair {
                Some((tight, loose)) if loose > 0 => tight as f32 / loose as f32,
                _ => 1.0,
            };
            let mask = Mask::new(image.width(), image.height(), data)
                .ok_or_else(|| GeoSegError::segmentation(VARIANT, "mask size mismatch"))?;
            masks.push(mask.with_score(score));
        }

        Ok(MaskSet::new(masks))
    }
}
