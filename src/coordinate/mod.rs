//! Pixel to world coordinate handling
//!
//! This module provides the affine geotransform of a raster and the
//! mapping between pixel indices and geographic coordinates.

mod affine;
mod bbox;
mod crs;
mod mapper;
mod point;

#[cfg(test)]
mod tests;

// Re-export key types
pub use self::affine::{AffineTransform, CoordinateError};
pub use self::bbox::BoundingBox;
pub use self::crs::{CoordinateSystem, CoordinateSystemFactory};
pub use self::mapper::CoordinateMapper;
pub use self::point::{GeoPoint, PixelPoint};
