//! Mask export utilities
//!
//! Writes segmentation masks as grayscale PNGs or as georeferenced
//! single-band GeoTIFFs.

use image::GrayImage;
use log::info;
use std::path::{Path, PathBuf};

use crate::coordinate::{AffineTransform, CoordinateSystemFactory};
use crate::errors::{GeoSegError, GeoSegResult};
use crate::segmentation::Mask;
use crate::tiff::builder::{ChunkLayout, ImageOptions, TiffBuilder};
use crate::tiff::constants::{compression, predictor};
use crate::tiff::errors::TiffError;

/// Rows per strip of exported masks
const MASK_ROWS_PER_STRIP: u32 = 64;

/// Output path `<dir>/<input stem>_mask_<index>.<extension>`
pub fn mask_output_path(output_dir: &Path, input: &Path, index: usize, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}_mask_{}.{}", stem, index, extension))
}

/// Whether a path names a TIFF file, ignoring case
pub fn has_tiff_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "tif" || ext == "tiff"
        })
        .unwrap_or(false)
}

/// Saves a mask as an 8-bit grayscale PNG, 255 inside and 0 outside
pub fn save_mask_png(mask: &Mask, output_path: &Path) -> GeoSegResult<()> {
    let image = GrayImage::from_raw(mask.width() as u32, mask.height() as u32, mask.to_bytes())
        .ok_or_else(|| GeoSegError::output(output_path, "mask buffer does not match its size"))?;
    image.save(output_path).map_err(|e| GeoSegError::output(output_path, e))?;

    info!("Saved mask PNG {}", output_path.display());
    Ok(())
}

/// Saves a mask as a single-band GeoTIFF
///
/// `transform` must already address the mask grid (see
/// `AffineTransform::scaled_for_image`). North-up transforms are stored
/// as pixel scale and tiepoint, others as a model transformation.
pub fn save_mask_geotiff(mask: &Mask, transform: &AffineTransform, epsg: Option<u32>, output_path: &Path) -> GeoSegResult<()> {
    let options = ImageOptions::new(mask.width() as u32, mask.height() as u32, 1)
        .with_layout(ChunkLayout::Strips { rows_per_strip: MASK_ROWS_PER_STRIP })
        .with_compression(compression::DEFLATE)
        .with_predictor(predictor::HORIZONTAL_DIFFERENCING);
    let samples: Vec<f64> = mask.to_bytes().into_iter().map(f64::from).collect();

    let to_output_error = |e: TiffError| GeoSegError::output(output_path, e);
    let mut builder = TiffBuilder::new(false);
    let index = builder.add_image(&options, &samples).map_err(to_output_error)?;

    let georeferenced = match transform.to_scale_and_tiepoint() {
        Some((scale, tiepoint)) => builder.set_pixel_scale_and_tiepoint(index, scale, tiepoint),
        None => builder.set_model_transformation(index, transform.to_model_transformation()),
    };
    georeferenced.map_err(to_output_error)?;

    if let Some(code) = epsg.and_then(|code| u16::try_from(code).ok()) {
        let geographic = CoordinateSystemFactory::from_epsg(code as u32).is_geographic();
        builder.set_geo_keys(index, code, geographic).map_err(to_output_error)?;
    }

    builder.write(output_path).map_err(to_output_error)?;
    info!("Saved mask GeoTIFF {}", output_path.display());
    Ok(())
}
