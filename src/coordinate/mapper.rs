//! Pixel index to geographic coordinate mapping

use super::affine::{AffineTransform, CoordinateError};
use super::point::{GeoPoint, PixelPoint};

/// Applies a raster's affine transform to pixel indices
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Geographic coordinate of pixel (`row`, `col`)
    ///
    /// The column feeds the X axis and the row the Y axis; the result
    /// reports Y as latitude and X as longitude.
    pub fn pixel_to_geo(transform: &AffineTransform, row: usize, col: usize) -> GeoPoint {
        let (x, y) = transform.apply(col as f64, row as f64);
        GeoPoint::new(y, x)
    }

    /// Fractional pixel position of a geographic coordinate
    pub fn geo_to_pixel(transform: &AffineTransform, point: &GeoPoint) -> Result<PixelPoint, CoordinateError> {
        let (col, row) = transform.inverse()?.apply(point.lon, point.lat);
        Ok(PixelPoint::new(row, col))
    }
}
