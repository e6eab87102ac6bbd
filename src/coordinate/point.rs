//! Point structures for pixel and geographic coordinates

use std::fmt;

/// A geographic coordinate derived from a pixel index
///
/// `lat` is the world Y value and `lon` the world X value of the raster's
/// coordinate system; for projected rasters these are easting/northing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat={:.8}, lon={:.8}", self.lat, self.lon)
    }
}

/// A fractional pixel position, as produced by the inverse transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub row: f64,
    pub col: f64,
}

impl PixelPoint {
    pub fn new(row: f64, col: f64) -> Self {
        PixelPoint { row, col }
    }

    /// Integer pixel containing this position, if inside a `width` x `height` grid
    pub fn to_index(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        let (row, col) = (self.row.floor(), self.col.floor());
        if row < 0.0 || col < 0.0 || row >= height as f64 || col >= width as f64 {
            return None;
        }
        Some((row as usize, col as usize))
    }
}
