//! Downscaling to a bounded image size

use image::imageops::{self, FilterType};
use log::debug;

use super::normalize::NormalizedImage;

/// Uniform factor that fits `width` x `height` inside `max_size`
///
/// Values of 1 or more mean the image already fits.
pub fn scale_factor(width: usize, height: usize, max_size: usize) -> f64 {
    let max_size = max_size as f64;
    (max_size / width as f64).min(max_size / height as f64)
}

/// New (width, height) if the image must shrink, `None` otherwise
pub fn target_dimensions(width: usize, height: usize, max_size: usize) -> Option<(usize, usize)> {
    let scale = scale_factor(width, height, max_size);
    if scale >= 1.0 {
        return None;
    }
    let new_width = ((width as f64 * scale).round() as usize).max(1);
    let new_height = ((height as f64 * scale).round() as usize).max(1);
    Some((new_width, new_height))
}

/// Shrinks the image so both sides are at most `max_size`
///
/// Uses a triangle (bilinear) filter, whose support widens with the
/// reduction so the result is anti-aliased. Images that fit are returned
/// unchanged; images are never enlarged.
pub fn resize_to_fit(image: NormalizedImage, max_size: usize) -> NormalizedImage {
    let (new_width, new_height) = match target_dimensions(image.width(), image.height(), max_size) {
        Some(dims) => dims,
        None => return image,
    };

    debug!("Resizing {}x{} to {}x{}", image.width(), image.height(), new_width, new_height);
    match image.to_rgb_image() {
        Some(rgb) => {
            let resized = imageops::resize(&rgb, new_width as u32, new_height as u32, FilterType::Triangle);
            NormalizedImage::from_rgb_image(resized)
        },
        None => image,
    }
}
