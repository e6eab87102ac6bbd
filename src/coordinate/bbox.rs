//! Bounding box of a georeferenced raster

use super::affine::AffineTransform;
use super::point::GeoPoint;

/// World extent covered by a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Extent of a `width` x `height` grid under `transform`
    ///
    /// All four corners are transformed so rotated rasters are covered.
    pub fn from_transform(transform: &AffineTransform, width: usize, height: usize) -> Self {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            transform.apply(0.0, 0.0),
            transform.apply(w, 0.0),
            transform.apply(0.0, h),
            transform.apply(w, h),
        ];

        corners.iter().fold(
            BoundingBox::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |bbox, &(x, y)| BoundingBox::new(
                bbox.min_x.min(x), bbox.min_y.min(y),
                bbox.max_x.max(x), bbox.max_y.max(y),
            ),
        )
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.min_y + self.height() / 2.0, self.min_x + self.width() / 2.0)
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lon >= self.min_x && point.lon <= self.max_x &&
            point.lat >= self.min_y && point.lat <= self.max_y
    }
}
