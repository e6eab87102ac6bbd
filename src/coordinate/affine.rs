//! Affine pixel-to-world transform
//!
//! Coefficients use the GDAL ordering `[c0, c1, c2, c3, c4, c5]`:
//!
//! ```text
//! x = c0 + col * c1 + row * c2
//! y = c3 + col * c4 + row * c5
//! ```

use std::fmt;
use log::debug;

use crate::tiff::constants::geo_key_values;
use crate::tiff::GeoInfo;

/// Reasons a transform cannot be built
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// Neither ModelTransformation nor ModelPixelScale + ModelTiepoint present
    MissingGeoreference,
    /// A coefficient is NaN or infinite
    NonFinite([f64; 6]),
    /// The linear part cannot be inverted
    Singular([f64; 6]),
    /// Resize factors must be finite and positive
    InvalidScale(f64, f64),
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::MissingGeoreference => {
                write!(f, "no ModelTransformation or ModelPixelScale/ModelTiepoint tags")
            },
            CoordinateError::NonFinite(c) => write!(f, "non-finite transform coefficients {:?}", c),
            CoordinateError::Singular(c) => write!(f, "degenerate transform {:?} (zero determinant)", c),
            CoordinateError::InvalidScale(sx, sy) => write!(f, "invalid resize factors ({}, {})", sx, sy),
        }
    }
}

impl std::error::Error for CoordinateError {}

/// Validated affine transform of a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    coefficients: [f64; 6],
}

impl AffineTransform {
    /// Builds a transform, rejecting non-finite or non-invertible coefficients
    pub fn new(coefficients: [f64; 6]) -> Result<Self, CoordinateError> {
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(CoordinateError::NonFinite(coefficients));
        }
        let det = coefficients[1] * coefficients[5] - coefficients[2] * coefficients[4];
        if det == 0.0 || !det.is_finite() {
            return Err(CoordinateError::Singular(coefficients));
        }
        Ok(AffineTransform { coefficients })
    }

    /// North-up transform from an origin and pixel size
    ///
    /// `pixel_height` is the (usually negative) Y step per row.
    pub fn from_origin(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Result<Self, CoordinateError> {
        Self::new([origin_x, pixel_width, 0.0, origin_y, 0.0, pixel_height])
    }

    /// Derives the transform from the GeoTIFF model tags
    ///
    /// ModelTransformation wins over ModelPixelScale + ModelTiepoint. Rasters
    /// tagged PixelIsPoint are shifted by half a pixel so that the transform
    /// addresses pixel corners.
    pub fn from_geo_info(geo_info: &GeoInfo) -> Result<Self, CoordinateError> {
        let coefficients = if let Some(m) = geo_info.transformation {
            [m[3], m[0], m[1], m[7], m[4], m[5]]
        } else if let (Some(scale), Some(tie)) = (geo_info.pixel_scale, geo_info.tiepoint) {
            let (sx, sy) = (scale[0], scale[1]);
            [tie[3] - tie[0] * sx, sx, 0.0, tie[4] + tie[1] * sy, 0.0, -sy]
        } else {
            return Err(CoordinateError::MissingGeoreference);
        };

        let mut transform = Self::new(coefficients)?;
        if geo_info.raster_type == Some(geo_key_values::RASTER_PIXEL_IS_POINT) {
            debug!("PixelIsPoint raster, shifting origin by half a pixel");
            let c = &mut transform.coefficients;
            c[0] -= 0.5 * (c[1] + c[2]);
            c[3] -= 0.5 * (c[4] + c[5]);
        }
        Ok(transform)
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.coefficients
    }

    /// Maps a (column, row) position to world (x, y)
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let c = &self.coefficients;
        (c[0] + col * c[1] + row * c[2], c[3] + col * c[4] + row * c[5])
    }

    fn determinant(&self) -> f64 {
        let c = &self.coefficients;
        c[1] * c[5] - c[2] * c[4]
    }

    /// The world-to-pixel transform
    pub fn inverse(&self) -> Result<Self, CoordinateError> {
        let c = &self.coefficients;
        let det = self.determinant();
        let (a, b, d, e) = (c[5] / det, -c[2] / det, -c[4] / det, c[1] / det);
        Self::new([
            -(a * c[0] + b * c[3]), a, b,
            -(d * c[0] + e * c[3]), d, e,
        ])
    }

    /// Transform for a resampled copy of the raster
    ///
    /// `scale_x` and `scale_y` are the new/old size ratios along columns and
    /// rows; the result maps pixel indices of the resampled grid to the
    /// same world positions.
    pub fn scaled_for_image(&self, scale_x: f64, scale_y: f64) -> Result<Self, CoordinateError> {
        if !(scale_x.is_finite() && scale_y.is_finite() && scale_x > 0.0 && scale_y > 0.0) {
            return Err(CoordinateError::InvalidScale(scale_x, scale_y));
        }
        let c = &self.coefficients;
        Self::new([
            c[0], c[1] / scale_x, c[2] / scale_y,
            c[3], c[4] / scale_x, c[5] / scale_y,
        ])
    }

    /// Pixel scale and tiepoint equivalent, if the transform has no rotation
    pub fn to_scale_and_tiepoint(&self) -> Option<([f64; 3], [f64; 6])> {
        let c = &self.coefficients;
        if c[2] != 0.0 || c[4] != 0.0 {
            return None;
        }
        Some(([c[1], -c[5], 0.0], [0.0, 0.0, 0.0, c[0], c[3], 0.0]))
    }

    /// Row-major 4x4 ModelTransformation equivalent
    pub fn to_model_transformation(&self) -> [f64; 16] {
        let c = &self.coefficients;
        [
            c[1], c[2], 0.0, c[0],
            c[4], c[5], 0.0, c[3],
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.coefficients;
        write!(f, "[{}, {}, {}, {}, {}, {}]", c[0], c[1], c[2], c[3], c[4], c[5])
    }
}
