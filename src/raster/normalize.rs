//! Per-band linear rescaling into an 8-bit, 3-channel image

use image::RgbImage;

/// Height x width x 3 image, row-major with interleaved channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl NormalizedImage {
    /// Wraps interleaved RGB data; `None` if the length does not match
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 3).then_some(NormalizedImage { width, height, data })
    }

    /// Stacks three normalized bands as the image channels
    pub fn from_bands(width: usize, height: usize, channels: [&[u8]; 3]) -> Option<Self> {
        if channels.iter().any(|c| c.len() != width * height) {
            return None;
        }
        let data = (0..width * height)
            .flat_map(|i| [channels[0][i], channels[1][i], channels[2][i]])
            .collect();
        Some(NormalizedImage { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (height, width, channels)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, 3)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let i = (row * self.width + col) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }

    pub fn from_rgb_image(image: RgbImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        NormalizedImage { width, height, data: image.into_raw() }
    }
}

/// Rescales a band to `[0, 255]` using its own min and max
///
/// Values map to `round((v - min) / (max - min) * 255)`. A constant band
/// maps to 0, as do NaN and infinite samples, which are left out of the
/// min/max computation.
pub fn normalize_band(values: &[f64]) -> Vec<u8> {
    let (min, max) = values.iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if max <= min {
        return vec![0; values.len()];
    }

    let range = max - min;
    values.iter()
        .map(|&v| {
            if v.is_finite() {
                ((v - min) / range * 255.0).round().clamp(0.0, 255.0) as u8
            } else {
                0
            }
        })
        .collect()
}
