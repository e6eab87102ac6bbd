//! Error types for the segmentation pipeline
//!
//! `GeoSegError` is what the public API returns. Each variant names the
//! failing stage and carries the file path or context it failed on.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::coordinate::CoordinateError;
use crate::tiff::errors::TiffError;

/// Errors surfaced by the raster reader, the engine and the pipeline
#[derive(Debug)]
pub enum GeoSegError {
    /// The path is missing, unreadable or not a TIFF container
    RasterOpen { path: PathBuf, source: TiffError },
    /// Band selection or pixel decoding failed
    RasterRead { path: PathBuf, reason: String },
    /// The raster has no usable pixel-to-world transform
    InvalidTransform { path: PathBuf, reason: String },
    /// The segmentation engine failed to load or to predict
    Segmentation { context: String, reason: String },
    /// Configuration file unreadable or invalid
    Config { path: PathBuf, reason: String },
    /// A result artifact could not be written
    Output { path: PathBuf, reason: String },
    /// A command-line argument is missing or malformed
    InvalidArgument { name: String, reason: String },
}

impl GeoSegError {
    pub fn raster_open(path: &Path, source: TiffError) -> Self {
        GeoSegError::RasterOpen { path: path.to_path_buf(), source }
    }

    pub fn raster_read(path: &Path, reason: impl fmt::Display) -> Self {
        GeoSegError::RasterRead { path: path.to_path_buf(), reason: reason.to_string() }
    }

    pub fn invalid_transform(path: &Path, reason: impl fmt::Display) -> Self {
        GeoSegError::InvalidTransform { path: path.to_path_buf(), reason: reason.to_string() }
    }

    pub fn segmentation(context: impl Into<String>, reason: impl fmt::Display) -> Self {
        GeoSegError::Segmentation { context: context.into(), reason: reason.to_string() }
    }

    pub fn config(path: &Path, reason: impl fmt::Display) -> Self {
        GeoSegError::Config { path: path.to_path_buf(), reason: reason.to_string() }
    }

    pub fn output(path: &Path, reason: impl fmt::Display) -> Self {
        GeoSegError::Output { path: path.to_path_buf(), reason: reason.to_string() }
    }

    pub fn invalid_argument(name: impl Into<String>, reason: impl fmt::Display) -> Self {
        GeoSegError::InvalidArgument { name: name.into(), reason: reason.to_string() }
    }

    /// Pipeline stage the error belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            GeoSegError::RasterOpen { .. } => "open",
            GeoSegError::RasterRead { .. } => "read",
            GeoSegError::InvalidTransform { .. } => "transform",
            GeoSegError::Segmentation { .. } => "segmentation",
            GeoSegError::Config { .. } => "config",
            GeoSegError::Output { .. } => "output",
            GeoSegError::InvalidArgument { .. } => "arguments",
        }
    }
}

impl fmt::Display for GeoSegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoSegError::RasterOpen { path, source } => {
                write!(f, "Cannot open raster {}: {}", path.display(), source)
            },
            GeoSegError::RasterRead { path, reason } => {
                write!(f, "Cannot read raster {}: {}", path.display(), reason)
            },
            GeoSegError::InvalidTransform { path, reason } => {
                write!(f, "Invalid geotransform in {}: {}", path.display(), reason)
            },
            GeoSegError::Segmentation { context, reason } => {
                write!(f, "Segmentation failed ({}): {}", context, reason)
            },
            GeoSegError::Config { path, reason } => {
                write!(f, "Invalid configuration {}: {}", path.display(), reason)
            },
            GeoSegError::Output { path, reason } => {
                write!(f, "Cannot write {}: {}", path.display(), reason)
            },
            GeoSegError::InvalidArgument { name, reason } => {
                write!(f, "Invalid argument --{}: {}", name, reason)
            },
        }
    }
}

impl std::error::Error for GeoSegError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoSegError::RasterOpen { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<(PathBuf, CoordinateError)> for GeoSegError {
    fn from((path, error): (PathBuf, CoordinateError)) -> Self {
        GeoSegError::InvalidTransform { path, reason: error.to_string() }
    }
}

/// Result type for pipeline operations
pub type GeoSegResult<T> = Result<T, GeoSegError>;
